//! Tiny Golf - a click-drag-release mini golf game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, gesture, scene generation)
//! - `renderer`: Backend-neutral draw lists built from game state
//! - `platform`: Input/output/pacing collaborators (terminal frontend)
//! - `runner`: Fixed-rate frame scheduler
//! - `settings` / `tuning`: Data-driven configuration

pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use runner::{AppError, FrameScheduler, SessionOutcome, SessionSummary};
pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (world units)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Ball side length (the ball is an axis-aligned square)
    pub const BALL_SIZE: f32 = 10.0;

    /// Number of obstacles per scene
    pub const OBSTACLE_COUNT: usize = 8;
    /// Obstacle side lengths are sampled from [MIN, MAX)
    pub const OBSTACLE_MIN_SIZE: u32 = 30;
    pub const OBSTACLE_MAX_SIZE: u32 = 80;

    /// Multiplicative velocity damping applied every tick
    pub const FRICTION: f32 = 0.95;
    /// Axis speeds below this snap to zero
    pub const MIN_VELOCITY: f32 = 0.5;
    /// Drag distance to launch velocity factor
    pub const LAUNCH_POWER: f32 = 0.1;

    /// Target loop rate (ticks per second)
    pub const FRAME_RATE: u32 = 60;
    /// Visible pause after sinking the ball
    pub const WIN_PAUSE_MS: u64 = 2000;

    /// Rejection-sampling cap for each placement loop
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Aim arrow geometry
    pub const ARROW_MAX_LENGTH: f32 = 100.0;
    pub const ARROW_HEAD_SIZE: f32 = 10.0;
}
