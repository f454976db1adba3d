//! Game session
//!
//! Owns the simulation state, the seeded RNG, the high-score store and the
//! render sink, and drives the fixed-rate tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;
use crate::error::ConfigError;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{
    Directions, GameEvent, GamePhase, GameState, LevelState, PlayerStatus, TickInput, tick,
};

/// Polled once per tick for the held directions
pub trait InputSource {
    fn directions(&self) -> Directions;
}

impl InputSource for Directions {
    fn directions(&self) -> Directions {
        *self
    }
}

/// Receives the board after every tick
pub trait RenderSink {
    fn present(&mut self, level: &LevelState, player: &PlayerStatus);
}

/// Sink that draws nothing
#[derive(Debug, Default)]
pub struct Headless;

impl RenderSink for Headless {
    fn present(&mut self, _level: &LevelState, _player: &PlayerStatus) {}
}

/// What a status bar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub level: u32,
    pub best_level: u32,
    pub lives: u8,
    /// Seconds of shield left, if shielded
    pub shield_seconds: Option<u32>,
    pub invincible: bool,
    pub phase: GamePhase,
}

/// A running game
pub struct Session {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    store: Box<dyn HighScoreStore>,
    sink: Box<dyn RenderSink>,
    accumulator: f32,
}

impl Session {
    /// Validate `settings` and start a run at level 1
    pub fn new(
        settings: Settings,
        seed: u64,
        store: Box<dyn HighScoreStore>,
        sink: Box<dyn RenderSink>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&settings, store.get(), &mut rng);
        log::info!("Session started with seed {} (best: {})", seed, state.high_score);

        Ok(Self {
            settings,
            seed,
            rng,
            state,
            store,
            sink,
            accumulator: 0.0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Start the current level over with a freshly generated board.
    /// Ignored after a game over; use [`Session::restart`] instead.
    pub fn start(&mut self) {
        if self.is_game_over() {
            log::warn!("Ignoring start after game over; restart instead");
            return;
        }
        self.state.start_level(&self.settings, &mut self.rng);
        self.accumulator = 0.0;
    }

    /// New run from level 1; the best level is kept
    pub fn restart(&mut self) {
        self.state.restart(&self.settings, &mut self.rng);
        self.accumulator = 0.0;
    }

    /// Run exactly one tick
    pub fn step(&mut self, directions: Directions) -> Vec<GameEvent> {
        let input = TickInput { directions };
        let events = tick(&mut self.state, &input, &self.settings, &mut self.rng);

        for event in &events {
            if let GameEvent::NewHighScore { level } = event {
                self.store.set(*level);
            }
        }

        self.sink.present(&self.state.level, &self.state.player);
        events
    }

    /// Feed wall-clock time and run as many whole ticks as it covers
    pub fn advance(&mut self, dt: f32, input: &impl InputSource) -> Vec<GameEvent> {
        let tick_dt = self.settings.tick_dt();
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= tick_dt && substeps < MAX_SUBSTEPS {
            events.extend(self.step(input.directions()));
            self.accumulator -= tick_dt;
            substeps += 1;
        }

        // Drop whatever the substep cap left behind
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(tick_dt);
        }
        events
    }

    pub fn hud(&self) -> Hud {
        let player = &self.state.player;
        Hud {
            level: self.state.current_level,
            best_level: self.state.high_score,
            lives: player.lives,
            shield_seconds: player.is_shielded().then_some(player.shield_seconds),
            invincible: player.is_invincible(),
            phase: self.state.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::{Pickup, PickupKind, Wall};
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    fn session() -> Session {
        Session::new(
            Settings::default(),
            42,
            Box::new(MemoryStore::new()),
            Box::new(Headless),
        )
        .unwrap()
    }

    fn plant_normal_on_player(session: &mut Session) {
        let level = &mut session.state.level;
        level.walls.clear();
        level.hazards.clear();
        level.pickups = vec![Pickup {
            id: 0,
            kind: PickupKind::Normal,
            pos: Vec2::new(15.0, 15.0),
            size: 35.0,
        }];
    }

    struct CountingSink(Rc<Cell<u32>>);

    impl RenderSink for CountingSink {
        fn present(&mut self, _level: &LevelState, _player: &PlayerStatus) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let settings = Settings {
            max_lives: 0,
            ..Default::default()
        };
        let result = Session::new(settings, 1, Box::new(MemoryStore::new()), Box::new(Headless));
        assert!(matches!(result, Err(ConfigError::NoLives)));
    }

    #[test]
    fn test_starts_at_level_one() {
        let session = session();
        let hud = session.hud();
        assert_eq!(hud.level, 1);
        assert_eq!(hud.best_level, 1);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.shield_seconds, None);
        assert_eq!(hud.phase, GamePhase::Playing);
        assert_eq!(session.state().level.pickups.len(), 1);
    }

    #[test]
    fn test_clear_writes_high_score_to_store() {
        let mut session = session();
        plant_normal_on_player(&mut session);

        session.step(Directions::default());

        assert_eq!(session.hud().level, 2);
        assert_eq!(session.hud().best_level, 2);
        assert_eq!(session.store().get(), 2);
    }

    #[test]
    fn test_clear_below_best_leaves_store_alone() {
        let mut session = Session::new(
            Settings::default(),
            42,
            Box::new(MemoryStore::with_best(10)),
            Box::new(Headless),
        )
        .unwrap();
        plant_normal_on_player(&mut session);

        session.step(Directions::default());

        assert_eq!(session.hud().best_level, 10);
        assert_eq!(session.store().get(), 10);
    }

    #[test]
    fn test_game_over_then_restart() {
        let mut session = session();
        session.state.player.lives = 1;
        session.state.level.walls.push(Wall {
            pos: Vec2::ZERO,
            size: Vec2::new(60.0, 60.0),
        });

        session.step(Directions::default());
        assert!(session.is_game_over());

        session.restart();
        assert!(!session.is_game_over());
        assert_eq!(session.hud().lives, 3);
        assert_eq!(session.hud().level, 1);
    }

    #[test]
    fn test_start_rebuilds_current_level() {
        let mut session = session();
        session.state.player.pos = Vec2::new(400.0, 300.0);
        session.state.player.activate_shield(5);
        let before = session.state().level.clone();

        session.start();

        let state = session.state();
        assert_eq!(state.current_level, 1);
        assert_eq!(state.level.number, 1);
        assert_ne!(state.level, before);
        assert_eq!(state.player.pos, session.settings().player_start());
        assert!(!state.player.is_shielded());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_start_after_game_over_is_ignored() {
        let mut session = session();
        session.state.player.lives = 1;
        session.state.level.walls.push(Wall {
            pos: Vec2::ZERO,
            size: Vec2::new(60.0, 60.0),
        });
        session.step(Directions::default());
        assert!(session.is_game_over());
        let frozen = session.state().clone();

        session.start();

        assert_eq!(session.state(), &frozen);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut session = session();
        session.state.level.walls.clear();
        session.state.level.hazards.clear();
        session.advance(1.0 / 30.0 + 0.001, &Directions::default());
        assert_eq!(session.state().time_ticks, 2);

        session.advance(0.004, &Directions::default());
        assert_eq!(session.state().time_ticks, 2);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let settings = Settings {
            tick_rate: 240,
            ..Default::default()
        };
        let mut session =
            Session::new(settings, 42, Box::new(MemoryStore::new()), Box::new(Headless)).unwrap();
        session.advance(10.0, &Directions::default());
        assert_eq!(session.state().time_ticks, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_sink_sees_every_tick() {
        let frames = Rc::new(Cell::new(0));
        let mut session = Session::new(
            Settings::default(),
            3,
            Box::new(MemoryStore::new()),
            Box::new(CountingSink(frames.clone())),
        )
        .unwrap();
        for _ in 0..5 {
            session.step(Directions::default());
        }
        assert_eq!(frames.get(), 5);
    }

    #[test]
    fn test_hud_reports_shield() {
        let mut session = session();
        session.state.player.activate_shield(5);
        assert_eq!(session.hud().shield_seconds, Some(5));
    }
}
