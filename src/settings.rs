//! Board and gameplay configuration
//!
//! Loaded from an optional JSON file; any omitted field keeps its reference
//! value. Invalid settings are rejected before a session is built.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,

    // === Player ===
    pub player_size: f32,
    /// Pixels moved per tick along a single axis
    pub player_speed: f32,
    pub player_start: (f32, f32),
    pub max_lives: u8,
    pub starting_lives: u8,

    // === Pickups & effects ===
    pub pickup_size: f32,
    pub shield_seconds: u32,
    pub invincibility_seconds: f32,

    // === Timing ===
    /// Fixed simulation rate in ticks per second
    pub tick_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_start: PLAYER_START,
            max_lives: MAX_LIVES,
            starting_lives: STARTING_LIVES,

            pickup_size: PICKUP_SIZE,
            shield_seconds: SHIELD_SECONDS,
            invincibility_seconds: INVINCIBILITY_SECONDS,

            tick_rate: TICK_RATE,
        }
    }
}

impl Settings {
    /// Board extent as a vector
    #[inline]
    pub fn board(&self) -> Vec2 {
        Vec2::new(self.board_width, self.board_height)
    }

    #[inline]
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_start.0, self.player_start.1)
    }

    /// Seconds per tick
    #[inline]
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Length of the post-hit invincibility window in ticks (at least one)
    pub fn invincibility_ticks(&self) -> u64 {
        ((self.invincibility_seconds * self.tick_rate as f32).round() as u64).max(1)
    }

    /// Scale a horizontal reference-board distance to this board
    #[inline]
    pub fn scale_x(&self, reference: f32) -> f32 {
        reference * self.board_width / BOARD_WIDTH
    }

    /// Scale a vertical reference-board distance to this board
    #[inline]
    pub fn scale_y(&self, reference: f32) -> f32 {
        reference * self.board_height / BOARD_HEIGHT
    }

    /// Check every field, failing on the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("pickup_size", self.pickup_size),
            ("invincibility_seconds", self.invincibility_seconds),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.board_width < MIN_BOARD_WIDTH || self.board_height < MIN_BOARD_HEIGHT {
            return Err(ConfigError::BoardTooSmall {
                width: self.board_width,
                height: self.board_height,
                min_width: MIN_BOARD_WIDTH,
                min_height: MIN_BOARD_HEIGHT,
            });
        }

        let limit = self.board_width.min(self.board_height);
        for (field, value) in [
            ("player_size", self.player_size),
            ("pickup_size", self.pickup_size),
        ] {
            if value >= limit {
                return Err(ConfigError::TooLargeForBoard {
                    field,
                    value,
                    limit,
                });
            }
        }

        if self.max_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.starting_lives == 0 || self.starting_lives > self.max_lives {
            return Err(ConfigError::StartingLives {
                starting_lives: self.starting_lives,
                max_lives: self.max_lives,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.shield_seconds == 0 {
            return Err(ConfigError::ZeroShieldDuration);
        }

        let (x, y) = self.player_start;
        let max = self.board() - Vec2::splat(self.player_size);
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 || x > max.x || y > max.y {
            return Err(ConfigError::StartOutsideBoard { x, y });
        }

        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
