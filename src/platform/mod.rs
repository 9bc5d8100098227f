//! Platform abstraction layer
//!
//! Handles everything outside the simulation:
//! - Input events (press/motion/release/quit, in world coordinates)
//! - Presenting a `DrawList`
//! - Time and frame pacing

pub mod pacer;
pub mod terminal;

use thiserror::Error;

use crate::renderer::DrawList;
use crate::sim::InputEvent;

pub use pacer::{Pacer, ThreadPacer};
pub use terminal::TerminalPlatform;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to initialize terminal: {0}")]
    Init(#[source] std::io::Error),
    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),
    #[error("failed to draw frame: {0}")]
    Present(#[source] std::io::Error),
}

/// Input source and render target for one session
pub trait Platform {
    /// Append every pending input event to `out` without blocking
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), PlatformError>;

    /// Draw one frame
    fn present(&mut self, frame: &DrawList) -> Result<(), PlatformError>;
}
