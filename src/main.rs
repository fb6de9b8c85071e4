mod display;

use std::fs::OpenOptions;
use std::io::{self, stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use rabbit_shooter::compute::{apply_input, init_session, tick};
use rabbit_shooter::config::{Config, DEFAULT_LOG_FILTER};
use rabbit_shooter::entities::{Arena, Flow, InputEvent};
use rabbit_shooter::highscore::{FileHighScore, HighScoreStore};
use rabbit_shooter::viewport::Viewport;

/// One simulation step per rendered frame (60 Hz).
const FRAME: Duration = Duration::from_micros(16_667);

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so log records go to a file.  Logging stays
/// off if the file cannot be opened.
fn init_logging(path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return,
    };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
    )
    .format_timestamp_secs()
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init();
}

// ── Input translation ─────────────────────────────────────────────────────────

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Every frame drains pending input, advances
/// the session one tick and redraws.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &mut FileHighScore,
) -> io::Result<()> {
    let mut rng = thread_rng();
    let arena = Arena::default();
    let (cols, rows) = terminal::size()?;
    let mut vp = Viewport::new(cols, rows, arena);
    let mut state = init_session(arena, store.load());
    // Last mouse cell, for the crosshair.
    let mut pointer: Option<(u16, u16)> = None;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            let ev = match rx.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(io::Error::new(
                        io::ErrorKind::BrokenPipe,
                        "terminal input stream closed",
                    ));
                }
            };
            let input = match ev {
                Event::Key(key) => translate_key(key),
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => match kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        pointer = Some((column, row));
                        Some(InputEvent::Click(vp.to_world(column, row)))
                    }
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        pointer = Some((column, row));
                        None
                    }
                    _ => None,
                },
                Event::Resize(cols, rows) => {
                    vp = Viewport::new(cols, rows, arena);
                    None
                }
                _ => None,
            };

            if let Some(input) = input {
                let (next, flow) = apply_input(&state, input, &mut rng);
                state = next;
                if flow == Flow::Exit {
                    log::info!("exit requested");
                    return Ok(());
                }
            }
        }

        state = tick(&state, &mut rng, store);
        display::render(out, &state, &vp, pointer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn setup_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;
    Ok(())
}

fn restore_terminal<W: Write>(out: &mut W) {
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn run<W: Write>(out: &mut W, store: &mut FileHighScore) -> io::Result<()> {
    setup_terminal(out)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::error!("terminal input failed: {}", e);
                break;
            }
        }
    });

    game_loop(out, &rx, store)
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config.log_file);
    log::info!("high score file: {}", config.score_file.display());

    let mut store = FileHighScore::new(config.score_file.clone());
    let mut out = BufWriter::new(stdout());

    let result = run(&mut out, &mut store);

    // Always restore the terminal
    restore_terminal(&mut out);

    result.context("terminal session failed")
}
