//! Collision detection and response for boxes
//!
//! The ball never reflects off obstacles the way it does off walls: an obstacle
//! hit swaps the velocity components, a wall hit negates the one on that axis.

use glam::Vec2;

use super::rect::Rect;

/// Which playfield edge pair a wall bounce came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left or right wall
    X,
    /// Top or bottom wall
    Y,
}

/// Index of the first obstacle (in slice order) overlapping `ball`
///
/// Later obstacles are not examined once a hit is found.
pub fn first_obstacle_hit(ball: &Rect, obstacles: &[Rect]) -> Option<usize> {
    obstacles.iter().position(|obstacle| ball.intersects(obstacle))
}

/// Obstacle response: exchange the x and y velocity components
#[inline]
pub fn swap_velocity(vel: Vec2) -> Vec2 {
    Vec2::new(vel.y, vel.x)
}

/// Walls touched or crossed by a ball whose top-left corner is at `pos`
///
/// Returns `(hit_x, hit_y)`. Each axis is tested independently; `<=`/`>=`
/// means a ball resting exactly on an edge counts as a hit.
pub fn wall_hits(pos: Vec2, ball_size: f32, arena: Vec2) -> (bool, bool) {
    let hit_x = pos.x <= 0.0 || pos.x >= arena.x - ball_size;
    let hit_y = pos.y <= 0.0 || pos.y >= arena.y - ball_size;
    (hit_x, hit_y)
}

/// Check if the ball box overlaps the hole box
pub fn ball_in_hole(ball: &Rect, hole: &Rect) -> bool {
    ball.intersects(hole)
}

/// Zero out any velocity component slower than `min_velocity`
pub fn apply_velocity_floor(vel: Vec2, min_velocity: f32) -> Vec2 {
    let floor = |v: f32| if v.abs() < min_velocity { 0.0 } else { v };
    Vec2::new(floor(vel.x), floor(vel.y))
}
