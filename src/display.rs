/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates state
/// into terminal commands, scaling arena units through the `Viewport`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rabbit_shooter::compute::is_new_record;
use rabbit_shooter::entities::{
    GameSession, GameStatus, Rabbit, RabbitKind, Rgb, HUD_MARGIN, RABBIT_SIZE,
};
use rabbit_shooter::viewport::Viewport;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Yellow;
const C_TEXT: Color = Color::White;
const C_RECORD: Color = Color::Rgb { r: 255, g: 215, b: 0 };
const C_GRID: Color = Color::Rgb { r: 0, g: 80, b: 0 };
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::Red;
const C_HUD_SPEED: Color = Color::Blue;
const C_EYE: Color = Color::White;
const C_NOSE: Color = Color::Rgb { r: 255, g: 105, b: 180 };
const C_CROSSHAIR: Color = Color::Red;
const C_GAME_OVER: Color = Color::Red;
const C_NEW_RECORD: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Arena spacing of the background grid.
const GRID_STEP: f64 = 40.0;

fn color_of(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `pointer` is the last known mouse cell.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameSession,
    vp: &Viewport,
    pointer: Option<(u16, u16)>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.status {
        GameStatus::Menu => draw_menu(out, state, vp)?,
        GameStatus::Playing => {
            draw_grid(out, state, vp)?;
            draw_hud(out, state, vp)?;
            for rabbit in state.rabbits.iter().filter(|r| r.alive) {
                draw_rabbit(out, rabbit, vp)?;
            }
            draw_controls_hint(out, vp)?;
            if let Some(cell) = pointer {
                draw_crosshair(out, cell, vp)?;
            }
        }
        GameStatus::GameOver => draw_game_over(out, state, vp)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, state: &GameSession, vp: &Viewport) -> std::io::Result<()> {
    let cy = vp.rows / 2;
    let top = cy.saturating_sub(7);

    print_centered(out, vp, top, "★  RABBIT  SHOOTER  ★", C_TITLE)?;
    print_centered(
        out,
        vp,
        top + 1,
        "Shoot the rabbits! Speed rises every 150 points!",
        C_TEXT,
    )?;
    print_centered(out, vp, top + 3, &format!("Record: {}", state.high_score), C_RECORD)?;
    print_centered(out, vp, top + 5, "CLICK on the rabbits to shoot!", C_TEXT)?;

    let mut kinds = RabbitKind::ALL;
    kinds.sort_by_key(|k| k.profile().points);

    // Legend entries share one left edge so the swatches line up
    let width = kinds
        .iter()
        .map(|k| legend_line(*k).chars().count() + 2)
        .max()
        .unwrap_or(0) as u16;
    let lx = (vp.cols / 2).saturating_sub(width / 2);
    for (i, kind) in kinds.iter().enumerate() {
        out.queue(cursor::MoveTo(lx, top + 6 + i as u16))?;
        out.queue(style::SetForegroundColor(color_of(kind.profile().color)))?;
        out.queue(Print("■ "))?;
        out.queue(style::SetForegroundColor(C_TEXT))?;
        out.queue(Print(legend_line(*kind)))?;
    }

    print_centered(
        out,
        vp,
        top + 7 + kinds.len() as u16,
        "SPACE : Start   ESC / Q : Quit",
        C_HINT,
    )?;
    Ok(())
}

fn legend_line(kind: RabbitKind) -> String {
    format!("{} rabbits: {} points", kind.label(), kind.profile().points)
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_grid<W: Write>(out: &mut W, state: &GameSession, vp: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_GRID))?;
    let arena = &state.arena;
    let mut y = HUD_MARGIN;
    while y < arena.height - HUD_MARGIN {
        let mut x = 0.0;
        while x < arena.width {
            let (col, row) = vp.to_cell(x, y);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("·"))?;
            x += GRID_STEP;
        }
        y += GRID_STEP;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession, vp: &Viewport) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    // Whole seconds, truncated
    let time_str = format!("Time: {}s", state.time_left.max(0.0) as u32);
    print_centered(out, vp, 0, &time_str, C_HUD_TIME)?;

    // Speed, right
    let speed_str = format!("Speed: x{:.1}", state.speed_multiplier);
    let rx = vp.cols.saturating_sub(speed_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SPEED))?;
    out.queue(Print(&speed_str))?;
    Ok(())
}

// ── Rabbits ───────────────────────────────────────────────────────────────────

fn draw_rabbit<W: Write>(out: &mut W, rabbit: &Rabbit, vp: &Viewport) -> std::io::Result<()> {
    // Body fills every cell the 40×40 box covers:
    //    ▲  ▲      ← ears, one row above
    //   █•██•█     ← eyes on the first body row
    //   ███▾██     ← nose on the second
    let color = color_of(rabbit.kind.profile().color);
    let (col, row, w, h) = vp.cell_span(rabbit.x, rabbit.y, RABBIT_SIZE, RABBIT_SIZE);
    let left_eye = col + w / 4;
    let right_eye = col + w - 1 - w / 4;

    // Ears, kept off the HUD row
    if row > 1 && w >= 3 {
        out.queue(style::SetForegroundColor(color))?;
        for ear in [left_eye, right_eye] {
            out.queue(cursor::MoveTo(ear, row - 1))?;
            out.queue(Print("▲"))?;
        }
    }

    out.queue(style::SetBackgroundColor(color))?;
    for r in row..row + h {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(" ".repeat(w as usize)))?;
    }

    if w >= 3 {
        out.queue(style::SetForegroundColor(C_EYE))?;
        for eye in [left_eye, right_eye] {
            out.queue(cursor::MoveTo(eye, row))?;
            out.queue(Print("•"))?;
        }
    }
    if h >= 2 {
        out.queue(cursor::MoveTo(col + w / 2, row + 1))?;
        out.queue(style::SetForegroundColor(C_NOSE))?;
        out.queue(Print("▾"))?;
    }

    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_crosshair<W: Write>(
    out: &mut W,
    (col, row): (u16, u16),
    vp: &Viewport,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_CROSSHAIR))?;
    if col > 0 {
        out.queue(cursor::MoveTo(col - 1, row))?;
        out.queue(Print("─┼"))?;
    } else {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("┼"))?;
    }
    if col + 1 < vp.cols {
        out.queue(Print("─"))?;
    }
    if row > 1 {
        out.queue(cursor::MoveTo(col, row - 1))?;
        out.queue(Print("│"))?;
    }
    if row + 1 < vp.rows {
        out.queue(cursor::MoveTo(col, row + 1))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("CLICK : Shoot   ESC / Q : Quit"))?;
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameSession,
    vp: &Viewport,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", C_GAME_OVER),
        ("║    GAME  OVER!     ║", C_GAME_OVER),
        ("╚════════════════════╝", C_GAME_OVER),
    ];

    let total_rows = lines.len() + 5; // box + score + record + banner + gap + hint
    let start_row = (vp.rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, vp, start_row + i as u16, msg, *color)?;
    }

    let score_row = start_row + lines.len() as u16;
    print_centered(out, vp, score_row, &format!("Final Score: {}", state.score), C_TEXT)?;
    print_centered(
        out,
        vp,
        score_row + 1,
        &format!("Record: {}", state.high_score),
        C_RECORD,
    )?;
    if is_new_record(state) {
        print_centered(out, vp, score_row + 2, "★ NEW RECORD! ★", C_NEW_RECORD)?;
    }

    print_centered(
        out,
        vp,
        score_row + 4,
        "SPACE : Play again   ESC : Menu   Q : Quit",
        C_HINT,
    )?;
    Ok(())
}
