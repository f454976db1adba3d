//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through the caller's seeded RNG
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod geometry;
pub mod level;
pub mod motion;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use geometry::{Rect, overlaps};
pub use level::{generate_level, hazard_counts};
pub use motion::{Directions, move_player, update_hazards};
pub use state::{
    GameEvent, GamePhase, GameState, Hazard, HazardKind, LevelState, Pickup, PickupKind,
    PlayerStatus, Wall,
};
pub use tick::{TickInput, tick};
