//! Axis-aligned rectangle geometry
//!
//! Every body in the game (ball, obstacles, hole) is an axis-aligned box
//! described by its top-left corner and size, y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` with its top-left corner at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect,
    /// and empty rectangles intersect nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Same rectangle moved so its top-left corner sits at `pos`
    pub fn at(&self, pos: Vec2) -> Self {
        Self::new(pos.x, pos.y, self.w, self.h)
    }
}
