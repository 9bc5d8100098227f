//! Fixed-step simulation tick
//!
//! Advances the ball by one frame. The tick has no side effects beyond the
//! `GameState` it is handed.

use super::collision::{
    Axis, apply_velocity_floor, ball_in_hole, first_obstacle_hit, swap_velocity, wall_hits,
};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick, returning what happened
///
/// Order matters and is part of the game's feel:
/// friction, obstacle test on the tentative position, move, walls, hole, floor.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase.is_terminal() {
        return events;
    }
    state.time_ticks += 1;

    let tuning = &state.tuning;
    let ball = &mut state.ball;

    ball.vel *= tuning.friction;

    // Only the first overlapping obstacle responds
    let tentative = ball.rect_at(ball.pos + ball.vel);
    if let Some(index) = first_obstacle_hit(&tentative, &state.obstacles) {
        ball.vel = swap_velocity(ball.vel);
        state.collisions += 1;
        events.push(GameEvent::ObstacleHit { index });
        log::debug!("Tick {}: obstacle {} hit", state.time_ticks, index);
    }

    // Post-collision velocity applied to the pre-collision position
    ball.pos += ball.vel;

    let (hit_x, hit_y) = wall_hits(ball.pos, ball.size, state.arena);
    if hit_x {
        ball.vel.x = -ball.vel.x;
        state.collisions += 1;
        events.push(GameEvent::WallHit { axis: Axis::X });
    }
    if hit_y {
        ball.vel.y = -ball.vel.y;
        state.collisions += 1;
        events.push(GameEvent::WallHit { axis: Axis::Y });
    }

    if ball_in_hole(&ball.rect(), &state.hole) {
        state.phase = GamePhase::Won;
        events.push(GameEvent::ReachedHole);
        log::info!(
            "Ball reached the hole after {} ticks, {} collisions",
            state.time_ticks,
            state.collisions
        );
    }

    ball.vel = apply_velocity_floor(ball.vel, tuning.min_velocity);

    events
}
