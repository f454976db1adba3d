//! Burger Dash - a single-screen burger-collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, motion, collisions, game state)
//! - `session`: Fixed-rate session driver owning the simulation and its collaborators
//! - `settings`: Board and gameplay configuration
//! - `highscores`: Best-level persistence

pub mod error;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use highscores::{HighScore, HighScoreStore, JsonFileStore, MemoryStore};
pub use session::{Headless, Hud, InputSource, RenderSink, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks per `Session::advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Reference board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 600.0;
    /// Smallest board the generator's margins and wall sizes still fit on
    pub const MIN_BOARD_WIDTH: f32 = 200.0;
    pub const MIN_BOARD_HEIGHT: f32 = 200.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 25.0;
    /// Pixels per tick along one axis
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_START: (f32, f32) = (10.0, 10.0);
    pub const MAX_LIVES: u8 = 5;
    pub const STARTING_LIVES: u8 = 3;

    /// Pickup bounding box side
    pub const PICKUP_SIZE: f32 = 35.0;
    /// Probability that a non-shield pickup is a healer
    pub const HEALER_CHANCE: f64 = 0.25;

    /// Shield lasts this many whole seconds
    pub const SHIELD_SECONDS: u32 = 5;
    /// Post-hit immunity window
    pub const INVINCIBILITY_SECONDS: f32 = 1.0;

    /// Walls
    pub const WALL_THICKNESS: f32 = 20.0;
    pub const WALL_BASE_LENGTH: f32 = 80.0;
    pub const WALL_LENGTH_VARIANCE_PER_LEVEL: f32 = 1.5;
    pub const WALL_FUZZ_BASE: f32 = 50.0;
    pub const WALL_FUZZ_PER_LEVEL: f32 = 2.5;
    pub const WALL_FUZZ_MAX: f32 = 200.0;
    /// Walls whose center is closer than this to a path endpoint are dropped
    pub const WALL_ENDPOINT_CLEARANCE: f32 = 50.0;
    /// One extra wall per path every this many levels
    pub const LEVELS_PER_EXTRA_WALL: u32 = 8;

    /// Re-roll cap for pickups stuck inside walls
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Margins at reference scale (scaled per axis for other boards)
    pub const PICKUP_MARGIN: f32 = 100.0;
    pub const REROLL_MARGIN: f32 = 75.0;
    pub const MOVER_MARGIN: f32 = 50.0;
    pub const SPINNER_MARGIN: f32 = 100.0;

    /// Hazards
    pub const HORIZONTAL_MOVER_SIZE: (f32, f32) = (60.0, 30.0);
    pub const VERTICAL_MOVER_SIZE: (f32, f32) = (30.0, 60.0);
    pub const SPINNER_BASE_SIZE: f32 = 50.0;
    pub const SPINNER_SIZE_VARIANCE: f32 = 20.0;
    pub const MOVER_BASE_SPEED: f32 = 2.0;
}
