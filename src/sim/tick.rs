//! Fixed timestep simulation tick
//!
//! One tick: run the protection timers, move the player and the hazards, then
//! resolve contacts. A pickup contact ends the tick early, so the player can
//! never eat a burger and take damage on the same tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::overlaps;
use super::motion::{Directions, move_player, update_hazards};
use super::state::{GameEvent, GamePhase, GameState, PickupKind};
use crate::settings::Settings;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Directions held this tick
    pub directions: Directions,
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Frozen until restart
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    // Protection timers
    state.player.expire_invincibility(state.time_ticks);
    if state.player.advance_shield(settings.tick_rate) {
        log::debug!("Shield expired");
        events.push(GameEvent::ShieldExpired);
    }

    // Motion
    let board = settings.board();
    state.player.pos = move_player(
        state.player.pos,
        input.directions,
        settings.player_speed,
        settings.player_size,
        board,
    );
    update_hazards(&mut state.level.hazards, board);

    resolve_contacts(state, settings, rng, &mut events);

    events
}

fn resolve_contacts(
    state: &mut GameState,
    settings: &Settings,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let player_rect = state.player.rect(settings.player_size);

    // First burger touched wins
    if let Some(idx) = state
        .level
        .pickups
        .iter()
        .position(|p| overlaps(&player_rect, &p.rect()))
    {
        let pickup = state.level.pickups.remove(idx);
        events.push(GameEvent::PickupCollected { kind: pickup.kind });

        match pickup.kind {
            PickupKind::Shield => {
                let fresh = state.player.activate_shield(settings.shield_seconds);
                log::debug!(
                    "Shield {} ({}s)",
                    if fresh { "raised" } else { "refreshed" },
                    settings.shield_seconds
                );
                events.push(GameEvent::ShieldActivated {
                    seconds: settings.shield_seconds,
                });
            }
            PickupKind::Healer => {
                state.player.heal(settings.max_lives);
            }
            PickupKind::Normal => {}
        }

        if state.level.is_cleared() {
            clear_level(state, settings, rng, events);
        }
        return;
    }

    if !state.player.is_vulnerable() {
        return;
    }

    let level = &state.level;
    let hit = level.walls.iter().any(|w| overlaps(&player_rect, &w.rect()))
        || level.hazards.iter().any(|h| overlaps(&player_rect, &h.rect()));

    if hit {
        lose_life(state, settings, events);
    }
}

fn clear_level(
    state: &mut GameState,
    settings: &Settings,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    state.current_level += 1;
    log::info!("Level cleared, advancing to {}", state.current_level);
    events.push(GameEvent::LevelCleared {
        next_level: state.current_level,
    });

    if state.current_level > state.high_score {
        state.high_score = state.current_level;
        events.push(GameEvent::NewHighScore {
            level: state.current_level,
        });
    }

    state.start_level(settings, rng);
}

fn lose_life(state: &mut GameState, settings: &Settings, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    player.lives = player.lives.saturating_sub(1);
    player.make_invincible(state.time_ticks, settings.invincibility_ticks());
    events.push(GameEvent::PlayerHit {
        lives_left: player.lives,
    });

    if player.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over at level {}", state.current_level);
        events.push(GameEvent::GameOver {
            level: state.current_level,
        });
    } else {
        player.pos = settings.player_start();
    }
}
