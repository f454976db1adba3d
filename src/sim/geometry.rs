//! Axis-aligned rectangles
//!
//! Everything on the board (player, pickups, walls, hazards) collides as an
//! axis-aligned box anchored at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn square(pos: Vec2, side: f32) -> Self {
        Self::new(pos, Vec2::splat(side))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// True if the rectangle lies entirely inside `[0, bounds]`, allowing for
    /// rounding in `pos + size`
    pub fn within(&self, bounds: Vec2) -> bool {
        const EPS: f32 = 1e-3;
        self.pos.cmpge(Vec2::ZERO).all() && self.max().cmple(bounds + EPS).all()
    }
}

/// AABB overlap test. Rectangles that merely touch count as overlapping.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    !(a_max.x < b_min.x || a_min.x > b_max.x || a_max.y < b_min.y || a_min.y > b_max.y)
}

/// Clamp a top-left position so a box of `size` stays inside `[0, bounds]`
#[inline]
pub fn clamp_to_board(pos: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, (bounds - size).max(Vec2::ZERO))
}
