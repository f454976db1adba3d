//! Configuration errors
//!
//! The simulation itself has no failure modes; everything that can go wrong
//! happens while loading or validating [`Settings`](crate::Settings).

use std::path::PathBuf;

use thiserror::Error;

/// Rejected or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be at least {min_width}x{min_height}, got {width}x{height}")]
    BoardTooSmall {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },

    #[error("{field} must be smaller than the board's shorter side ({limit}), got {value}")]
    TooLargeForBoard {
        field: &'static str,
        value: f32,
        limit: f32,
    },

    #[error("max_lives must be at least 1")]
    NoLives,

    #[error("starting_lives must be in 1..={max_lives}, got {starting_lives}")]
    StartingLives { starting_lives: u8, max_lives: u8 },

    #[error("tick_rate must be non-zero")]
    ZeroTickRate,

    #[error("shield_seconds must be non-zero")]
    ZeroShieldDuration,

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("player start ({x}, {y}) lies outside the board")]
    StartOutsideBoard { x: f32, y: f32 },

    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
