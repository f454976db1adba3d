//! Demo-mode steering
//!
//! Heads straight for the closest plain burger (or any burger once none are
//! required). It makes no attempt to avoid walls; it exists to drive headless
//! runs, not to play well.

use super::motion::Directions;
use super::state::{GamePhase, GameState};
use crate::settings::Settings;

/// Pick directions that close in on the nearest target pickup
pub fn autopilot(state: &GameState, settings: &Settings) -> Directions {
    if state.phase == GamePhase::GameOver {
        return Directions::default();
    }

    let half = settings.player_size / 2.0;
    let center = state.player.pos + half;

    let pickups = &state.level.pickups;
    let any_required = pickups.iter().any(|p| p.kind.is_required());
    let target = pickups
        .iter()
        .filter(|p| p.kind.is_required() || !any_required)
        .map(|p| p.rect().center())
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return Directions::default();
    };

    // Dead zone keeps the token from jittering around the target
    let delta = target - center;
    let dead_zone = settings.player_speed / 2.0;
    Directions {
        up: delta.y < -dead_zone,
        down: delta.y > dead_zone,
        left: delta.x < -dead_zone,
        right: delta.x > dead_zone,
    }
}
