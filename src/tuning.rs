//! Data-driven game balance
//!
//! Everything the physics and scene generator read lives here so a settings
//! file can reshape a session without recompiling.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and scene-generation knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball side length
    pub ball_size: f32,
    /// Obstacles generated per scene
    pub obstacle_count: usize,
    /// Smallest obstacle side (inclusive)
    pub obstacle_min_size: u32,
    /// Largest obstacle side (exclusive)
    pub obstacle_max_size: u32,
    /// Per-tick velocity multiplier
    pub friction: f32,
    /// Axis speeds below this are clamped to zero
    pub min_velocity: f32,
    /// Drag-to-velocity factor on release
    pub launch_power: f32,
    /// Cap for every rejection-sampling loop in scene generation
    pub max_placement_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_size: BALL_SIZE,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_min_size: OBSTACLE_MIN_SIZE,
            obstacle_max_size: OBSTACLE_MAX_SIZE,
            friction: FRICTION,
            min_velocity: MIN_VELOCITY,
            launch_power: LAUNCH_POWER,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}
