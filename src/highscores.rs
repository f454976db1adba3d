//! Best-level record
//!
//! The only thing that outlives a session is the highest level ever reached.
//! Stores keep the max of what they hold and what they are given, so writing
//! the same or a lower value is harmless.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Reported when nothing has been stored yet
pub const DEFAULT_HIGH_SCORE: u32 = 1;

/// Key-value style access to the persisted best level
pub trait HighScoreStore {
    /// Best level stored, or [`DEFAULT_HIGH_SCORE`] if none
    fn get(&self) -> u32;
    /// Record `level` if it beats the stored value
    fn set(&mut self, level: u32);
}

/// Serialized record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best_level: u32,
}

impl Default for HighScore {
    fn default() -> Self {
        Self {
            best_level: DEFAULT_HIGH_SCORE,
        }
    }
}

/// In-memory store for tests and throwaway runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(level: u32) -> Self {
        Self { best: Some(level) }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> u32 {
        self.best.unwrap_or(DEFAULT_HIGH_SCORE)
    }

    fn set(&mut self, level: u32) {
        self.best = Some(self.best.map_or(level, |best| best.max(level)));
    }
}

/// JSON file on disk, created on first write
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    record: HighScore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file starts fresh.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let record = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<HighScore>(&json) {
                Ok(record) => {
                    log::info!("Loaded best level {} from {}", record.best_level, path.display());
                    record
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt high score file {}: {}", path.display(), e);
                    HighScore::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                HighScore::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                HighScore::default()
            }
        };
        Self { path, record }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) {
        let json = match serde_json::to_string_pretty(&self.record) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize high score: {}", e);
                return;
            }
        };
        match std::fs::write(&self.path, json) {
            Ok(()) => log::info!("High score saved (level {})", self.record.best_level),
            Err(e) => log::warn!("Could not write {}: {}", self.path.display(), e),
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn get(&self) -> u32 {
        self.record.best_level
    }

    fn set(&mut self, level: u32) {
        if level > self.record.best_level {
            self.record.best_level = level;
            self.save();
        }
    }
}
