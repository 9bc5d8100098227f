//! Rendering module
//!
//! Turns game state into a backend-neutral `DrawList`; platforms rasterize it.

pub mod draw;
pub mod shapes;

pub use draw::{Color, DrawCommand, DrawList, colors};
pub use shapes::{Arrow, aim_arrow, scene};
