//! Per-tick movement for the player and the moving hazards

use std::f32::consts::SQRT_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::clamp_to_board;
use super::state::{Hazard, HazardKind};

/// Held directions for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Unit step on each axis; opposite keys cancel out
    pub fn axis(&self) -> Vec2 {
        let dx = self.right as i8 - self.left as i8;
        let dy = self.down as i8 - self.up as i8;
        Vec2::new(dx as f32, dy as f32)
    }
}

/// Move the player one tick and keep it on the board.
///
/// Diagonals are scaled by 1/√2 so every direction covers the same distance.
pub fn move_player(pos: Vec2, input: Directions, speed: f32, size: f32, board: Vec2) -> Vec2 {
    let axis = input.axis();
    if axis == Vec2::ZERO {
        return pos;
    }

    let step = if axis.x != 0.0 && axis.y != 0.0 {
        axis * (speed / SQRT_2)
    } else {
        axis * speed
    };

    clamp_to_board(pos + step, Vec2::splat(size), board)
}

/// Advance every mover, bouncing off the board edges. Spinners stay put.
pub fn update_hazards(hazards: &mut [Hazard], board: Vec2) {
    for hazard in hazards.iter_mut() {
        if hazard.kind == HazardKind::Mover {
            bounce_step(hazard, board);
        }
    }
}

fn bounce_step(hazard: &mut Hazard, board: Vec2) {
    let next = hazard.pos + hazard.vel;
    let far = next + hazard.size;

    if next.x <= 0.0 || far.x >= board.x {
        hazard.vel.x = -hazard.vel.x;
    }
    if next.y <= 0.0 || far.y >= board.y {
        hazard.vel.y = -hazard.vel.y;
    }

    hazard.pos = clamp_to_board(next, hazard.size, board);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOARD: Vec2 = Vec2::new(800.0, 600.0);

    fn mover(pos: Vec2, vel: Vec2) -> Hazard {
        Hazard {
            id: 0,
            kind: HazardKind::Mover,
            pos,
            size: Vec2::new(60.0, 30.0),
            vel,
        }
    }

    #[test]
    fn test_no_input_no_motion() {
        let pos = Vec2::new(100.0, 100.0);
        assert_eq!(move_player(pos, Directions::default(), 6.0, 25.0, BOARD), pos);

        let opposed = Directions {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(move_player(pos, opposed, 6.0, 25.0, BOARD), pos);
    }

    #[test]
    fn test_orthogonal_step() {
        let pos = Vec2::new(100.0, 100.0);
        let up = Directions {
            up: true,
            ..Default::default()
        };
        assert_eq!(move_player(pos, up, 6.0, 25.0, BOARD), Vec2::new(100.0, 94.0));
    }

    #[test]
    fn test_diagonal_speed_matches_orthogonal() {
        let pos = Vec2::new(300.0, 300.0);
        let diag = Directions {
            down: true,
            right: true,
            ..Default::default()
        };
        let moved = move_player(pos, diag, 6.0, 25.0, BOARD);
        assert!(((moved - pos).length() - 6.0).abs() < 1e-4);
        assert!(moved.x > pos.x && moved.y > pos.y);
    }

    #[test]
    fn test_player_clamped_at_edges() {
        let left_up = Directions {
            up: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(
            move_player(Vec2::new(1.0, 2.0), left_up, 6.0, 25.0, BOARD),
            Vec2::ZERO
        );

        let right = Directions {
            right: true,
            ..Default::default()
        };
        assert_eq!(
            move_player(Vec2::new(773.0, 50.0), right, 6.0, 25.0, BOARD),
            Vec2::new(775.0, 50.0)
        );
    }

    #[test]
    fn test_mover_bounces_off_right_edge() {
        let mut hazards = [mover(Vec2::new(738.0, 100.0), Vec2::new(3.0, 0.0))];
        update_hazards(&mut hazards, BOARD);
        assert_eq!(hazards[0].vel, Vec2::new(-3.0, 0.0));
        assert_eq!(hazards[0].pos, Vec2::new(740.0, 100.0));

        update_hazards(&mut hazards, BOARD);
        assert_eq!(hazards[0].pos, Vec2::new(737.0, 100.0));
    }

    #[test]
    fn test_mover_bounces_off_top_edge() {
        let mut hazard = mover(Vec2::new(100.0, 1.0), Vec2::new(0.0, -2.5));
        hazard.size = Vec2::new(30.0, 60.0);
        let mut hazards = [hazard];
        update_hazards(&mut hazards, BOARD);
        assert_eq!(hazards[0].vel, Vec2::new(0.0, 2.5));
        assert_eq!(hazards[0].pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_spinner_not_moved() {
        let mut spinner = mover(Vec2::new(200.0, 200.0), Vec2::new(5.0, 5.0));
        spinner.kind = HazardKind::Spinner;
        let mut hazards = [spinner.clone()];
        update_hazards(&mut hazards, BOARD);
        assert_eq!(hazards[0], spinner);
    }

    fn directions() -> impl Strategy<Value = Directions> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right)| Directions {
                up,
                down,
                left,
                right,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_board(
            x in 0.0f32..775.0,
            y in 0.0f32..575.0,
            inputs in prop::collection::vec(directions(), 1..200),
        ) {
            let mut pos = Vec2::new(x, y);
            for input in inputs {
                pos = move_player(pos, input, 6.0, 25.0, BOARD);
                prop_assert!(pos.x >= 0.0 && pos.x <= 775.0);
                prop_assert!(pos.y >= 0.0 && pos.y <= 575.0);
            }
        }

        #[test]
        fn prop_step_length_is_direction_invariant(input in directions()) {
            let pos = Vec2::new(400.0, 300.0);
            let moved = move_player(pos, input, 6.0, 25.0, BOARD);
            let len = (moved - pos).length();
            prop_assert!(len.abs() < 1e-4 || (len - 6.0).abs() < 1e-4);
        }

        #[test]
        fn prop_movers_stay_on_board(
            x in 0.0f32..740.0,
            y in 0.0f32..570.0,
            speed in 0.5f32..12.0,
            ticks in 1usize..500,
        ) {
            let mut hazards = [mover(Vec2::new(x, y), Vec2::new(speed, 0.0))];
            for _ in 0..ticks {
                update_hazards(&mut hazards, BOARD);
                prop_assert!(hazards[0].rect().within(BOARD));
                prop_assert!((hazards[0].vel.x.abs() - speed).abs() < 1e-6);
            }
        }
    }
}
