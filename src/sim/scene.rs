//! Scene generation: obstacles and the hole
//!
//! Placement is rejection sampling against the ball's starting box. Obstacles
//! are allowed to overlap each other. Every sampling loop draws from a bounded
//! attempt budget so impossible layouts fail instead of spinning forever.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneGenerationError {
    #[error(
        "arena {width}x{height} must be larger than the biggest obstacle ({max_obstacle}) and the ball ({ball_size})"
    )]
    ArenaTooSmall {
        width: f32,
        height: f32,
        max_obstacle: u32,
        ball_size: f32,
    },
    #[error("obstacle size range {min}..{max} is empty")]
    EmptySizeRange { min: u32, max: u32 },
    #[error("could not place obstacle {index} clear of the ball after {attempts} attempts")]
    ObstaclePlacement { index: usize, attempts: u32 },
    #[error("could not place the hole clear of the ball and obstacles after {attempts} attempts")]
    HolePlacement { attempts: u32 },
}

/// Static geometry for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub obstacles: Vec<Rect>,
    pub hole: Rect,
}

/// Remaining samples for one placement
struct Budget {
    left: u32,
}

impl Budget {
    fn new(attempts: u32) -> Self {
        Self { left: attempts }
    }

    fn take(&mut self) -> bool {
        if self.left == 0 {
            return false;
        }
        self.left -= 1;
        true
    }
}

/// Integer playfield extents used for sampling positions
struct Extent {
    width: u32,
    height: u32,
}

/// Generate obstacles, then a hole, for a ball starting at `ball_start`
pub fn generate_scene<R: Rng + ?Sized>(
    rng: &mut R,
    arena: Vec2,
    ball_start: &Rect,
    tuning: &Tuning,
) -> Result<Scene, SceneGenerationError> {
    if tuning.obstacle_min_size >= tuning.obstacle_max_size {
        return Err(SceneGenerationError::EmptySizeRange {
            min: tuning.obstacle_min_size,
            max: tuning.obstacle_max_size,
        });
    }

    let extent = Extent {
        width: arena.x.max(0.0) as u32,
        height: arena.y.max(0.0) as u32,
    };
    let hole_side = tuning.ball_size.ceil() as u32;
    if extent.width <= tuning.obstacle_max_size
        || extent.height <= tuning.obstacle_max_size
        || extent.width <= hole_side
        || extent.height <= hole_side
    {
        return Err(SceneGenerationError::ArenaTooSmall {
            width: arena.x,
            height: arena.y,
            max_obstacle: tuning.obstacle_max_size,
            ball_size: tuning.ball_size,
        });
    }

    let obstacles = generate_obstacles(rng, &extent, ball_start, tuning)?;
    let hole = generate_hole(rng, &extent, ball_start, &obstacles, tuning)?;

    Ok(Scene { obstacles, hole })
}

fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    extent: &Extent,
    ball_start: &Rect,
    tuning: &Tuning,
) -> Result<Vec<Rect>, SceneGenerationError> {
    let mut obstacles = Vec::with_capacity(tuning.obstacle_count);

    for index in 0..tuning.obstacle_count {
        let mut budget = Budget::new(tuning.max_placement_attempts);
        let obstacle = loop {
            if !budget.take() {
                return Err(SceneGenerationError::ObstaclePlacement {
                    index,
                    attempts: tuning.max_placement_attempts,
                });
            }
            let candidate = sample_obstacle(rng, extent, tuning);
            if !candidate.intersects(ball_start) {
                break candidate;
            }
        };
        obstacles.push(obstacle);
    }

    Ok(obstacles)
}

fn sample_obstacle<R: Rng + ?Sized>(rng: &mut R, extent: &Extent, tuning: &Tuning) -> Rect {
    let size = tuning.obstacle_min_size..tuning.obstacle_max_size;
    let w = rng.random_range(size.clone());
    let h = rng.random_range(size);
    let x = rng.random_range(0..extent.width - w);
    let y = rng.random_range(0..extent.height - h);
    Rect::new(x as f32, y as f32, w as f32, h as f32)
}

fn sample_hole_position<R: Rng + ?Sized>(rng: &mut R, extent: &Extent, side: f32) -> Rect {
    let side_px = side.ceil() as u32;
    let x = rng.random_range(0..extent.width - side_px);
    let y = rng.random_range(0..extent.height - side_px);
    Rect::new(x as f32, y as f32, side, side)
}

fn generate_hole<R: Rng + ?Sized>(
    rng: &mut R,
    extent: &Extent,
    ball_start: &Rect,
    obstacles: &[Rect],
    tuning: &Tuning,
) -> Result<Rect, SceneGenerationError> {
    let side = tuning.ball_size;
    place_hole(
        || sample_hole_position(rng, extent, side),
        ball_start,
        obstacles,
        tuning.max_placement_attempts,
    )
}

/// Place the hole from a stream of candidate positions.
///
/// Each round first resamples until the hole clears the ball, then walks the
/// obstacles in order, resampling while the hole overlaps the current one.
/// A resample for obstacle `i` is not rechecked against earlier obstacles or
/// the ball, so the finished round is validated as a whole and rerun if it
/// landed somewhere invalid. All rounds share one attempt budget.
fn place_hole(
    mut sample: impl FnMut() -> Rect,
    ball_start: &Rect,
    obstacles: &[Rect],
    attempts: u32,
) -> Result<Rect, SceneGenerationError> {
    let mut budget = Budget::new(attempts);
    let exhausted = || SceneGenerationError::HolePlacement { attempts };

    loop {
        let mut hole = loop {
            if !budget.take() {
                return Err(exhausted());
            }
            let candidate = sample();
            if !candidate.intersects(ball_start) {
                break candidate;
            }
        };

        for obstacle in obstacles {
            while hole.intersects(obstacle) {
                if !budget.take() {
                    return Err(exhausted());
                }
                hole = sample();
            }
        }

        if is_clear(&hole, ball_start, obstacles) {
            return Ok(hole);
        }
        log::debug!("Hole at ({}, {}) re-entered a checked area, retrying", hole.x, hole.y);
    }
}

/// Check that `rect` overlaps neither the ball start nor any obstacle
pub fn is_clear(rect: &Rect, ball_start: &Rect, obstacles: &[Rect]) -> bool {
    !rect.intersects(ball_start) && obstacles.iter().all(|o| !rect.intersects(o))
}
