//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per scheduler iteration, no wall-clock dependence
//! - Seeded RNG only (scene generation)
//! - Stable iteration order (obstacles are scanned in generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod gesture;
pub mod rect;
pub mod scene;
pub mod state;
pub mod tick;

pub use collision::{Axis, first_obstacle_hit, swap_velocity, wall_hits};
pub use gesture::{Gesture, InputEvent, impulse};
pub use rect::Rect;
pub use scene::{Scene, SceneGenerationError, generate_scene};
pub use state::{Ball, GameEvent, GamePhase, GameState, ball_start};
pub use tick::tick;
