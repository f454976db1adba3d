//! Game state and core simulation types
//!
//! Everything a renderer or save file needs lives here; the RNG stays with
//! the session so this state remains plain serializable data.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::level::generate_level;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; the tick is frozen until restart
    GameOver,
}

/// Burger types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Plain burger, required to clear the level
    Normal,
    /// Grants a timed shield
    Shield,
    /// Restores one life
    Healer,
}

impl PickupKind {
    /// Returns true if this pickup must be eaten to clear the level
    pub fn is_required(&self) -> bool {
        *self == PickupKind::Normal
    }
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: f32,
}

impl Pickup {
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// A static wall, fixed for the lifetime of a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Wall {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Slides along one axis and bounces off the board edges
    Mover,
    /// Stationary; any spin is purely cosmetic
    Spinner,
}

/// A dynamic hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

impl Hazard {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Everything generated for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    pub number: u32,
    /// Live pickups in generation order
    pub pickups: Vec<Pickup>,
    pub walls: Vec<Wall>,
    pub hazards: Vec<Hazard>,
}

impl LevelState {
    /// Number of plain burgers still on the board
    pub fn required_remaining(&self) -> usize {
        self.pickups.iter().filter(|p| p.kind.is_required()).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.required_remaining() == 0
    }
}

/// The player token and its protection timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub pos: Vec2,
    pub lives: u8,
    /// Tick at which the post-hit invincibility window closes
    pub invincible_until: Option<u64>,
    /// Whole seconds of shield left (0 = no shield)
    pub shield_seconds: u32,
    /// Ticks elapsed since the last shield countdown step
    shield_ticks: u32,
}

impl PlayerStatus {
    pub fn new(pos: Vec2, lives: u8) -> Self {
        Self {
            pos,
            lives,
            invincible_until: None,
            shield_seconds: 0,
            shield_ticks: 0,
        }
    }

    pub fn rect(&self, size: f32) -> Rect {
        Rect::square(self.pos, size)
    }

    #[inline]
    pub fn is_shielded(&self) -> bool {
        self.shield_seconds > 0
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    /// Neither shield nor invincibility is up
    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        !self.is_shielded() && !self.is_invincible()
    }

    /// Raise or refresh the shield. Refreshing resets the countdown instead of
    /// stacking. Returns true if the shield was newly raised.
    pub fn activate_shield(&mut self, seconds: u32) -> bool {
        let fresh = !self.is_shielded();
        if fresh {
            self.shield_ticks = 0;
        }
        self.shield_seconds = seconds;
        fresh
    }

    pub fn deactivate_shield(&mut self) {
        self.shield_seconds = 0;
        self.shield_ticks = 0;
    }

    /// Advance the 1 Hz shield countdown by one tick. Returns true on expiry.
    pub fn advance_shield(&mut self, tick_rate: u32) -> bool {
        if !self.is_shielded() {
            return false;
        }
        self.shield_ticks += 1;
        if self.shield_ticks < tick_rate {
            return false;
        }
        self.shield_ticks = 0;
        self.shield_seconds -= 1;
        if self.shield_seconds == 0 {
            self.deactivate_shield();
            return true;
        }
        false
    }

    /// Open the invincibility window; absurdly long windows saturate
    pub fn make_invincible(&mut self, now: u64, duration_ticks: u64) {
        self.invincible_until = Some(now.saturating_add(duration_ticks));
    }

    /// Close the invincibility window once its deadline has been reached
    pub fn expire_invincibility(&mut self, now: u64) -> bool {
        match self.invincible_until {
            Some(until) if now >= until => {
                self.invincible_until = None;
                true
            }
            _ => false,
        }
    }

    /// Gain a life, capped at `max_lives`. Returns true if a life was gained.
    pub fn heal(&mut self, max_lives: u8) -> bool {
        if self.lives < max_lives {
            self.lives += 1;
            true
        } else {
            false
        }
    }
}

/// Things that happened during a tick, for HUDs and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupCollected { kind: PickupKind },
    ShieldActivated { seconds: u32 },
    ShieldExpired,
    PlayerHit { lives_left: u8 },
    LevelCleared { next_level: u32 },
    NewHighScore { level: u32 },
    GameOver { level: u32 },
}

/// Complete game state (deterministic given the session RNG)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub current_level: u32,
    /// Best level reached, as loaded from and written back to the store
    pub high_score: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: PlayerStatus,
    pub level: LevelState,
}

impl GameState {
    /// Fresh run at level 1 with the level already generated
    pub fn new(settings: &Settings, high_score: u32, rng: &mut impl Rng) -> Self {
        let start = settings.player_start();
        let mut state = Self {
            current_level: 1,
            high_score,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: PlayerStatus::new(start, settings.starting_lives),
            level: LevelState {
                number: 1,
                pickups: Vec::new(),
                walls: Vec::new(),
                hazards: Vec::new(),
            },
        };
        state.start_level(settings, rng);
        state
    }

    /// Begin `current_level`: drop the shield, put the player back at the
    /// start and build a brand-new level. Invincibility runs out on its own.
    pub fn start_level(&mut self, settings: &Settings, rng: &mut impl Rng) {
        self.player.deactivate_shield();
        self.player.pos = settings.player_start();
        self.level = generate_level(self.current_level, self.player.pos, settings, rng);
    }

    /// Back to level 1 with starting lives and no protection
    pub fn restart(&mut self, settings: &Settings, rng: &mut impl Rng) {
        self.current_level = 1;
        self.phase = GamePhase::Playing;
        self.player.lives = settings.starting_lives;
        self.player.invincible_until = None;
        self.start_level(settings, rng);
        log::info!("Restarted at level 1 (best: {})", self.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_refresh_resets_instead_of_stacking() {
        let mut player = PlayerStatus::new(Vec2::ZERO, 3);
        assert!(player.activate_shield(5));
        for _ in 0..(3 * 60) {
            player.advance_shield(60);
        }
        assert_eq!(player.shield_seconds, 2);

        assert!(!player.activate_shield(5));
        assert_eq!(player.shield_seconds, 5);
    }

    #[test]
    fn test_shield_expires_after_its_seconds() {
        let mut player = PlayerStatus::new(Vec2::ZERO, 3);
        player.activate_shield(5);
        let mut expired_at = None;
        for t in 1..=400 {
            if player.advance_shield(60) {
                expired_at = Some(t);
                break;
            }
        }
        assert_eq!(expired_at, Some(300));
        assert!(player.is_vulnerable());
    }

    #[test]
    fn test_invincibility_window() {
        let mut player = PlayerStatus::new(Vec2::ZERO, 3);
        player.make_invincible(100, 60);
        assert!(player.is_invincible());
        assert!(!player.expire_invincibility(159));
        assert!(player.expire_invincibility(160));
        assert!(player.is_vulnerable());
    }

    #[test]
    fn test_endless_invincibility_saturates() {
        let mut player = PlayerStatus::new(Vec2::ZERO, 3);
        player.make_invincible(1_000, u64::MAX);
        assert_eq!(player.invincible_until, Some(u64::MAX));
        assert!(!player.expire_invincibility(u64::MAX - 1));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = PlayerStatus::new(Vec2::ZERO, 4);
        assert!(player.heal(5));
        assert!(!player.heal(5));
        assert_eq!(player.lives, 5);
    }

    #[test]
    fn test_required_remaining_counts_normals_only() {
        let pickup = |id, kind| Pickup {
            id,
            kind,
            pos: Vec2::ZERO,
            size: 35.0,
        };
        let level = LevelState {
            number: 3,
            pickups: vec![
                pickup(0, PickupKind::Shield),
                pickup(1, PickupKind::Healer),
                pickup(2, PickupKind::Normal),
            ],
            walls: Vec::new(),
            hazards: Vec::new(),
        };
        assert_eq!(level.required_remaining(), 1);
        assert!(!level.is_cleared());
    }
}
