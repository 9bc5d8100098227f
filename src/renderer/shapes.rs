//! Shape generation for the playfield

use glam::Vec2;
use std::f32::consts::PI;

use super::draw::{DrawList, colors};
use crate::consts::{ARROW_HEAD_SIZE, ARROW_MAX_LENGTH};
use crate::sim::GameState;

/// Aim arrow geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    /// Arrow tail (ball centre)
    pub start: Vec2,
    /// Arrow tip
    pub tip: Vec2,
    /// Barb end points, each joined to the tip
    pub barbs: [Vec2; 2],
}

/// Build the aim arrow for a drag delta anchored at the ball centre
///
/// The shaft points opposite the drag (the direction the ball will travel),
/// capped at `ARROW_MAX_LENGTH`. Barbs fan out ±30° around the drag
/// direction from the tip. Returns None for a zero-length drag.
pub fn aim_arrow(start: Vec2, delta: Vec2) -> Option<Arrow> {
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return None;
    }
    let length = distance.min(ARROW_MAX_LENGTH);
    let tip = start - delta * (length / distance);

    let angle = delta.y.atan2(delta.x);
    let barb = |a: f32| tip + Vec2::new(a.cos(), a.sin()) * ARROW_HEAD_SIZE;

    Some(Arrow {
        start,
        tip,
        barbs: [barb(angle - PI / 6.0), barb(angle + PI / 6.0)],
    })
}

/// Build the draw list for the current state
pub fn scene(state: &GameState) -> DrawList {
    let mut frame = DrawList::new(state.arena, colors::BACKGROUND);

    frame.fill_rect(state.ball.rect(), colors::BALL);
    for obstacle in &state.obstacles {
        frame.fill_rect(*obstacle, colors::OBSTACLE);
    }
    frame.fill_rect(state.hole, colors::HOLE);

    if state.gesture.is_dragging() {
        if let Some(arrow) = aim_arrow(state.ball.rect().center(), state.gesture.delta()) {
            frame.line(arrow.start, arrow.tip, colors::ARROW);
            frame.polyline(vec![arrow.barbs[0], arrow.tip, arrow.barbs[1]], colors::ARROW);
        }
    }

    frame.status = format!("collisions: {}", state.collisions);
    frame
}
