//! Draw command types for backend-neutral rendering

use glam::Vec2;

use crate::sim::Rect;

/// 8-bit RGB color
pub type Color = [u8; 3];

/// A single primitive in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid axis-aligned rectangle
    FillRect { rect: Rect, color: Color },
    /// Straight segment
    Line { from: Vec2, to: Vec2, color: Color },
    /// Connected segments through `points` (open)
    Polyline { points: Vec<Vec2>, color: Color },
}

/// One frame's worth of drawing, painted back to front
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    /// Playfield size the commands are expressed in
    pub size: Vec2,
    /// Fill for everything not covered by a command
    pub background: Color,
    pub commands: Vec<DrawCommand>,
    /// Status line for the HUD
    pub status: String,
}

impl DrawList {
    pub fn new(size: Vec2, background: Color) -> Self {
        Self {
            size,
            background,
            commands: Vec::new(),
            status: String::new(),
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, color: Color) {
        self.commands.push(DrawCommand::Polyline { points, color });
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0, 0, 255];
    pub const BALL: Color = [255, 255, 255];
    pub const OBSTACLE: Color = [255, 0, 0];
    pub const HOLE: Color = [0, 255, 0];
    pub const ARROW: Color = [255, 255, 0];
}
