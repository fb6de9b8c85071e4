/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle) and returns a brand-new
/// `GameSession`.  Side effects are limited to the injected RNG and, when a
/// round ends on a new record, the injected `HighScoreStore`.

use rand::Rng;

use crate::entities::{
    Arena, Flow, GameSession, GameStatus, InputEvent, Point, Rabbit, RabbitKind,
    DIRECTION_CHANGE_CHANCE, DIRECTION_CHANGE_INTERVAL, INITIAL_RABBITS, MAX_RABBITS,
    POINTS_PER_SPEED_STEP, RABBIT_SIZE, ROUND_SECONDS, SPAWN_INTERVAL, TICK_SECONDS,
};
use crate::highscore::HighScoreStore;

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Steps up by one every `POINTS_PER_SPEED_STEP` points, starting at 1.
pub fn speed_multiplier_for(score: u32) -> f64 {
    (score / POINTS_PER_SPEED_STEP + 1) as f64
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the session shown at launch: the menu, with the persisted record.
pub fn init_session(arena: Arena, high_score: u32) -> GameSession {
    GameSession {
        status: GameStatus::Menu,
        score: 0,
        high_score,
        time_left: ROUND_SECONDS,
        speed_multiplier: 1.0,
        rabbits: Vec::new(),
        spawn_timer: 0,
        frame: 0,
        arena,
    }
}

/// A fresh rabbit of uniformly random kind somewhere inside the spawn box.
pub fn spawn_rabbit(arena: &Arena, rng: &mut impl Rng) -> Rabbit {
    let kind = RabbitKind::ALL[rng.gen_range(0..RabbitKind::ALL.len())];
    let (x_lo, x_hi) = arena.spawn_x();
    let (y_lo, y_hi) = arena.spawn_y();
    Rabbit {
        x: rng.gen_range(x_lo..=x_hi) as f64,
        y: rng.gen_range(y_lo..=y_hi) as f64,
        vx: rng.gen_range(-2.0..=2.0),
        vy: rng.gen_range(-2.0..=2.0),
        kind,
        alive: true,
        direction_change_timer: 0,
    }
}

// ── Rabbit motion ─────────────────────────────────────────────────────────────

/// Move a rabbit one frame, bouncing off the arena walls.  Dead rabbits are
/// returned unchanged.
pub fn advance_rabbit(
    rabbit: &Rabbit,
    arena: &Arena,
    speed_multiplier: f64,
    rng: &mut impl Rng,
) -> Rabbit {
    if !rabbit.alive {
        return rabbit.clone();
    }

    let speed = rabbit.kind.profile().base_speed * speed_multiplier;
    let mut x = rabbit.x + rabbit.vx * speed;
    let mut y = rabbit.y + rabbit.vy * speed;
    let mut vx = rabbit.vx;
    let mut vy = rabbit.vy;

    if x <= arena.min_x() || x >= arena.max_x() {
        vx = -vx;
        x = x.clamp(arena.min_x(), arena.max_x());
    }
    if y <= arena.min_y() || y >= arena.max_y() {
        vy = -vy;
        y = y.clamp(arena.min_y(), arena.max_y());
    }

    let mut timer = rabbit.direction_change_timer + 1;
    if timer > DIRECTION_CHANGE_INTERVAL {
        if rng.gen_bool(DIRECTION_CHANGE_CHANCE) {
            vx = rng.gen_range(-3.0..=3.0);
            vy = rng.gen_range(-3.0..=3.0);
        }
        timer = 0;
    }

    Rabbit {
        x,
        y,
        vx,
        vy,
        direction_change_timer: timer,
        ..rabbit.clone()
    }
}

/// Half-open rectangle test against the rabbit's current 40×40 box.
pub fn is_hit(rabbit: &Rabbit, point: Point) -> bool {
    point.x >= rabbit.x
        && point.x < rabbit.x + RABBIT_SIZE
        && point.y >= rabbit.y
        && point.y < rabbit.y + RABBIT_SIZE
}

// ── State transitions ────────────────────────────────────────────────────────

/// Begin a new round: score and clock reset, six rabbits on the field.
/// The high score carries over.
pub fn start_game(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    let rabbits = (0..INITIAL_RABBITS)
        .map(|_| spawn_rabbit(&state.arena, rng))
        .collect();
    log::info!("round started (record {})", state.high_score);
    GameSession {
        status: GameStatus::Playing,
        score: 0,
        time_left: ROUND_SECONDS,
        speed_multiplier: 1.0,
        rabbits,
        spawn_timer: 0,
        frame: 0,
        ..state.clone()
    }
}

/// Leave the game-over screen for the menu.  No-op in any other state.
pub fn return_to_menu(state: &GameSession) -> GameSession {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    GameSession {
        status: GameStatus::Menu,
        ..state.clone()
    }
}

/// Shoot at `point`.  The first live rabbit in spawn order that contains the
/// point dies and awards its points; at most one rabbit per click.
pub fn handle_click(state: &GameSession, point: Point) -> GameSession {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let Some(idx) = state
        .rabbits
        .iter()
        .position(|r| r.alive && is_hit(r, point))
    else {
        return state.clone();
    };

    let mut rabbits = state.rabbits.clone();
    rabbits[idx].alive = false;
    let points = rabbits[idx].kind.profile().points;
    GameSession {
        rabbits,
        score: state.score + points,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure: RNG and score store are injected) ────────

/// Advance the simulation by one fixed step.  A no-op outside `Playing`.
pub fn tick(
    state: &GameSession,
    rng: &mut impl Rng,
    store: &mut impl HighScoreStore,
) -> GameSession {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    // ── 1. Clock ──────────────────────────────────────────────────────────────
    let time_left = state.time_left - TICK_SECONDS;
    if time_left <= 0.0 {
        let mut high_score = state.high_score;
        if state.score > high_score {
            high_score = state.score;
            log::info!("new high score: {}", high_score);
            store.save(high_score);
        }
        log::info!("game over: score {} after {} ticks", state.score, state.frame + 1);
        return GameSession {
            status: GameStatus::GameOver,
            time_left,
            high_score,
            frame: state.frame + 1,
            ..state.clone()
        };
    }

    // ── 2. Difficulty ─────────────────────────────────────────────────────────
    let speed_multiplier = speed_multiplier_for(state.score);

    // ── 3. Move, then sweep the dead ──────────────────────────────────────────
    let mut rabbits: Vec<Rabbit> = state
        .rabbits
        .iter()
        .map(|r| advance_rabbit(r, &state.arena, speed_multiplier, rng))
        .filter(|r| r.alive)
        .collect();

    // ── 4. Spawn ──────────────────────────────────────────────────────────────
    let mut spawn_timer = state.spawn_timer + 1;
    if spawn_timer > SPAWN_INTERVAL && rabbits.len() < MAX_RABBITS {
        rabbits.push(spawn_rabbit(&state.arena, rng));
        spawn_timer = 0;
    }

    GameSession {
        time_left,
        speed_multiplier,
        rabbits,
        spawn_timer,
        frame: state.frame + 1,
        ..state.clone()
    }
}

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Route one input event to the matching transition.
pub fn apply_input(
    state: &GameSession,
    event: InputEvent,
    rng: &mut impl Rng,
) -> (GameSession, Flow) {
    match (event, state.status) {
        (InputEvent::Quit, _) => (state.clone(), Flow::Exit),
        (InputEvent::Confirm, GameStatus::Menu | GameStatus::GameOver) => {
            (start_game(state, rng), Flow::Continue)
        }
        (InputEvent::Confirm, GameStatus::Playing) => (state.clone(), Flow::Continue),
        (InputEvent::Cancel, GameStatus::GameOver) => (return_to_menu(state), Flow::Continue),
        (InputEvent::Cancel, _) => (state.clone(), Flow::Exit),
        (InputEvent::Click(point), _) => (handle_click(state, point), Flow::Continue),
    }
}

/// Whether the game-over screen should celebrate a new record.
pub fn is_new_record(state: &GameSession) -> bool {
    state.status == GameStatus::GameOver && state.score > 0 && state.score >= state.high_score
}
