//! Procedural level generation
//!
//! A level is built in four passes: scatter the burgers, drop walls along the
//! implicit path the player would walk between them, nudge burgers out of any
//! wall they landed in, then add moving hazards once the level is high enough.

use glam::Vec2;
use rand::Rng;

use super::geometry::{clamp_to_board, overlaps};
use super::state::{Hazard, HazardKind, LevelState, Pickup, PickupKind, Wall};
use crate::consts::*;
use crate::settings::Settings;

/// Generate a complete level. Deterministic for a given RNG state.
pub fn generate_level(
    level: u32,
    player_start: Vec2,
    settings: &Settings,
    rng: &mut impl Rng,
) -> LevelState {
    let mut pickups = place_pickups(level, settings, rng);
    let walls = generate_path_walls(level, player_start, &pickups, settings, rng);
    resolve_wall_overlaps(&mut pickups, &walls, settings, rng);
    let hazards = generate_hazards(level, settings, rng);

    log::info!(
        "Level {}: {} pickups, {} walls, {} hazards",
        level,
        pickups.len(),
        walls.len(),
        hazards.len()
    );

    LevelState {
        number: level,
        pickups,
        walls,
        hazards,
    }
}

/// Uniform integer-ish roll in `[lo, hi)`, floored like a pixel coordinate
fn roll(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    lo + (rng.random::<f32>() * (hi - lo).max(0.0)).floor()
}

/// Random top-left position inside the given reference margins
fn roll_position(rng: &mut impl Rng, settings: &Settings, margin: f32, size: Vec2) -> Vec2 {
    let (mx, my) = (settings.scale_x(margin), settings.scale_y(margin));
    let x = roll(rng, mx, settings.board_width - mx);
    let y = roll(rng, my, settings.board_height - my);
    clamp_to_board(Vec2::new(x, y), size, settings.board())
}

/// One shield from level 2 on, the rest plain or healer burgers
pub(crate) fn place_pickups(level: u32, settings: &Settings, rng: &mut impl Rng) -> Vec<Pickup> {
    let mut kinds = Vec::with_capacity(level as usize);
    if level >= 2 {
        kinds.push(PickupKind::Shield);
    }
    let remaining = level.saturating_sub(kinds.len() as u32);
    for _ in 0..remaining {
        kinds.push(if rng.random_bool(HEALER_CHANCE) {
            PickupKind::Healer
        } else {
            PickupKind::Normal
        });
    }

    let size = Vec2::splat(settings.pickup_size);
    kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| Pickup {
            id: i as u32,
            kind,
            pos: roll_position(rng, settings, PICKUP_MARGIN, size),
            size: settings.pickup_size,
        })
        .collect()
}

/// Walls along the path start -> pickup 0 -> pickup 1 -> ...
///
/// Each leg gets `1 + level / 8` evenly spaced walls set across the dominant
/// direction of travel. Walls landing within the clearance of either leg end
/// are dropped, so short legs may get none at all.
pub(crate) fn generate_path_walls(
    level: u32,
    player_start: Vec2,
    pickups: &[Pickup],
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<Wall> {
    let board = settings.board();
    let walls_per_path = 1 + level / LEVELS_PER_EXTRA_WALL;
    let fuzz = (WALL_FUZZ_BASE + level as f32 * WALL_FUZZ_PER_LEVEL).min(WALL_FUZZ_MAX);
    let variance = level as f32 * WALL_LENGTH_VARIANCE_PER_LEVEL;

    let mut walls = Vec::new();
    let mut anchor = player_start;

    for pickup in pickups {
        let target = pickup.pos;
        let delta = target - anchor;
        // Mostly-horizontal legs get tall walls, mostly-vertical legs wide ones
        let tall = delta.x.abs() > delta.y.abs();

        for i in 0..walls_per_path {
            let t = (i + 1) as f32 / (walls_per_path + 1) as f32;
            let point = anchor + delta * t;
            let length = WALL_BASE_LENGTH + rng.random::<f32>() * variance;
            let jitter = (rng.random::<f32>() - 0.5) * fuzz;

            let (pos, size) = if tall {
                let size = Vec2::new(WALL_THICKNESS, length.min(board.y));
                (Vec2::new(point.x, point.y - size.y / 2.0 + jitter), size)
            } else {
                let size = Vec2::new(length.min(board.x), WALL_THICKNESS);
                (Vec2::new(point.x - size.x / 2.0 + jitter, point.y), size)
            };

            let wall = Wall {
                pos: clamp_to_board(pos, size, board),
                size,
            };
            let center = wall.rect().center();
            if center.distance(anchor) < WALL_ENDPOINT_CLEARANCE
                || center.distance(target) < WALL_ENDPOINT_CLEARANCE
            {
                continue;
            }
            walls.push(wall);
        }

        anchor = target;
    }

    walls
}

/// Re-roll burgers sitting on a wall, up to `MAX_PLACEMENT_ATTEMPTS` each.
///
/// Only walls are checked; burgers may still land on each other. A burger
/// that never finds a free spot keeps its last position.
pub(crate) fn resolve_wall_overlaps(
    pickups: &mut [Pickup],
    walls: &[Wall],
    settings: &Settings,
    rng: &mut impl Rng,
) {
    let size = Vec2::splat(settings.pickup_size);

    for pickup in pickups.iter_mut() {
        let mut attempts = 0;
        loop {
            let rect = pickup.rect();
            if !walls.iter().any(|w| overlaps(&rect, &w.rect())) {
                break;
            }
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                log::warn!(
                    "Pickup {} still inside a wall after {} attempts, keeping {:?}",
                    pickup.id,
                    attempts,
                    pickup.pos
                );
                break;
            }
            pickup.pos = roll_position(rng, settings, REROLL_MARGIN, size);
            attempts += 1;
        }
        if attempts > 0 {
            log::debug!("Pickup {} moved after {} attempts", pickup.id, attempts);
        }
    }
}

/// Hazard counts for a level: (horizontal movers, vertical movers, spinners)
pub fn hazard_counts(level: u32) -> (u32, u32, u32) {
    let horizontal = if level >= 10 { (level - 9) / 3 } else { 0 };
    let vertical = if level >= 15 { (level - 14) / 3 } else { 0 };
    let spinners = if level >= 20 { (level - 19) / 4 } else { 0 };
    (horizontal, vertical, spinners)
}

pub(crate) fn generate_hazards(level: u32, settings: &Settings, rng: &mut impl Rng) -> Vec<Hazard> {
    let board = settings.board();
    let (horizontal, vertical, spinners) = hazard_counts(level);
    let speed = MOVER_BASE_SPEED + level as f32 / 10.0;
    let (mx, my) = (settings.scale_x(MOVER_MARGIN), settings.scale_y(MOVER_MARGIN));

    let mut hazards = Vec::with_capacity((horizontal + vertical + spinners) as usize);
    let mut push = |kind, pos: Vec2, size: Vec2, vel| {
        hazards.push(Hazard {
            id: hazards.len() as u32,
            kind,
            pos: clamp_to_board(pos, size, board),
            size,
            vel,
        });
    };

    // Horizontal movers start near the left edge
    let size = Vec2::from(HORIZONTAL_MOVER_SIZE);
    for _ in 0..horizontal {
        let y = my + rng.random::<f32>() * (board.y - 2.0 * my);
        push(HazardKind::Mover, Vec2::new(mx, y), size, Vec2::new(speed, 0.0));
    }

    // Vertical movers start near the top edge
    let size = Vec2::from(VERTICAL_MOVER_SIZE);
    for _ in 0..vertical {
        let x = mx + rng.random::<f32>() * (board.x - 2.0 * mx);
        push(HazardKind::Mover, Vec2::new(x, my), size, Vec2::new(0.0, speed));
    }

    let (sx, sy) = (settings.scale_x(SPINNER_MARGIN), settings.scale_y(SPINNER_MARGIN));
    for _ in 0..spinners {
        let side = SPINNER_BASE_SIZE + rng.random::<f32>() * SPINNER_SIZE_VARIANCE;
        let x = sx + rng.random::<f32>() * (board.x - 2.0 * sx);
        let y = sy + rng.random::<f32>() * (board.y - 2.0 * sy);
        push(HazardKind::Spinner, Vec2::new(x, y), Vec2::splat(side), Vec2::ZERO);
    }

    hazards
}
