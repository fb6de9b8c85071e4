/// All game entity types: pure data, no logic beyond table lookups.

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Rabbits are square sprites of this many arena units.
pub const RABBIT_SIZE: f64 = 40.0;

/// Length of one round in seconds.
pub const ROUND_SECONDS: f64 = 60.0;

/// One fixed simulation step (60 Hz).
pub const TICK_SECONDS: f64 = 1.0 / 60.0;

pub const INITIAL_RABBITS: usize = 6;
pub const MAX_RABBITS: usize = 8;

/// Ticks between spawns (≈3 s). A spawn fires once the timer *exceeds* this.
pub const SPAWN_INTERVAL: u32 = 180;

/// Ticks between direction-change rolls (≈2 s).
pub const DIRECTION_CHANGE_INTERVAL: u32 = 120;
pub const DIRECTION_CHANGE_CHANCE: f64 = 0.3;

/// Speed multiplier steps up by one every this many points.
pub const POINTS_PER_SPEED_STEP: u32 = 150;

/// Height of the HUD strips above and below the arena.
pub const HUD_MARGIN: f64 = 60.0;

/// Lowest a rabbit's top edge may sit, measured up from the bottom edge.
pub const FLOOR_CLEARANCE: f64 = 110.0;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Backend-agnostic colour; the renderer converts it to its own type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// The playfield in arena units.  Rabbits move inside the band between the
/// two HUD strips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Arena {
            width: 1000.0,
            height: 700.0,
        }
    }
}

impl Arena {
    pub fn min_x(&self) -> f64 {
        0.0
    }

    pub fn max_x(&self) -> f64 {
        self.width - RABBIT_SIZE
    }

    pub fn min_y(&self) -> f64 {
        HUD_MARGIN
    }

    pub fn max_y(&self) -> f64 {
        self.height - FLOOR_CLEARANCE
    }

    /// Inclusive integer range for spawn x positions.
    pub fn spawn_x(&self) -> (i64, i64) {
        (50, self.width as i64 - 90)
    }

    /// Inclusive integer range for spawn y positions.
    pub fn spawn_y(&self) -> (i64, i64) {
        (100, self.height as i64 - 150)
    }
}

// ── Rabbit kinds ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RabbitKind {
    Normal,
    Fast,
    Bonus,
    Sneaky,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RabbitProfile {
    pub color: Rgb,
    pub points: u32,
    pub base_speed: f64,
}

/// Indexed by `RabbitKind as usize`.
static PROFILES: [RabbitProfile; 4] = [
    RabbitProfile { color: Rgb(139, 69, 19),   points: 10, base_speed: 1.0 },
    RabbitProfile { color: Rgb(34, 139, 34),   points: 20, base_speed: 1.5 },
    RabbitProfile { color: Rgb(255, 215, 0),   points: 50, base_speed: 0.8 },
    RabbitProfile { color: Rgb(147, 112, 219), points: 30, base_speed: 2.0 },
];

impl RabbitKind {
    pub const ALL: [RabbitKind; 4] = [
        RabbitKind::Normal,
        RabbitKind::Fast,
        RabbitKind::Bonus,
        RabbitKind::Sneaky,
    ];

    pub fn profile(self) -> &'static RabbitProfile {
        &PROFILES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            RabbitKind::Normal => "Brown",
            RabbitKind::Fast => "Green",
            RabbitKind::Bonus => "Golden",
            RabbitKind::Sneaky => "Purple",
        }
    }
}

// ── Rabbit ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Rabbit {
    /// Top-left corner in arena units.
    pub x: f64,
    pub y: f64,
    /// Per-frame velocity before the kind/difficulty speed factors.
    pub vx: f64,
    pub vy: f64,
    pub kind: RabbitKind,
    pub alive: bool,
    pub direction_change_timer: u32,
}

// ── Input / control flow ──────────────────────────────────────────────────────

/// Discrete events delivered by the input backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer click at an arena position.
    Click(Point),
    Confirm,
    Cancel,
    /// Window close / interrupt: always exits.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
}

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub status: GameStatus,
    pub score: u32,
    pub high_score: u32,
    /// Seconds left in the current round.
    pub time_left: f64,
    pub speed_multiplier: f64,
    /// Live rabbits in spawn order.
    pub rabbits: Vec<Rabbit>,
    pub spawn_timer: u32,
    /// Ticks advanced in the current round.
    pub frame: u64,
    pub arena: Arena,
}
