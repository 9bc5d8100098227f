//! Game state and core simulation types
//!
//! One `GameState` owns everything a session mutates. Nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::gesture::{Gesture, InputEvent, impulse};
use super::rect::Rect;
use super::scene::{Scene, SceneGenerationError, generate_scene};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play (or at rest, waiting for a shot)
    Playing,
    /// Ball reached the hole
    Won,
    /// Player quit
    Quit,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Tentative position overlapped obstacle `index`
    ObstacleHit { index: usize },
    /// Ball touched the left/right (`X`) or top/bottom (`Y`) walls
    WallHit { axis: super::collision::Axis },
    /// Ball overlapped the hole
    ReachedHole,
    /// Drag released, ball launched with this velocity
    Launched { velocity: Vec2 },
}

/// The ball: a square with float position (top-left corner) and velocity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Current bounding box
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Bounding box at an arbitrary position
    pub fn rect_at(&self, pos: Vec2) -> Rect {
        Rect::square(pos, self.size)
    }

    pub fn is_at_rest(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// Starting position of the ball: its top-left corner at the screen centre
pub fn ball_start(arena: Vec2) -> Vec2 {
    (arena / 2.0).floor()
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Scene seed for reproducibility
    pub seed: u64,
    /// Playfield size
    pub arena: Vec2,
    /// Balance values the tick reads
    pub tuning: Tuning,
    pub ball: Ball,
    /// Static obstacles, scanned in order on collision
    pub obstacles: Vec<Rect>,
    pub hole: Rect,
    /// Total wall and obstacle bounces (only ever increases)
    pub collisions: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub gesture: Gesture,
}

impl GameState {
    /// Build a session: place the ball at the centre and generate a scene from `seed`
    pub fn new(seed: u64, settings: &Settings) -> Result<Self, SceneGenerationError> {
        let arena = Vec2::new(settings.screen_width, settings.screen_height);
        let tuning = settings.tuning.clone();
        let ball = Ball::new(ball_start(arena), tuning.ball_size);

        let mut rng = Pcg32::seed_from_u64(seed);
        let scene = generate_scene(&mut rng, arena, &ball.rect(), &tuning)?;
        log::info!(
            "Scene for seed {}: {} obstacles, hole at ({}, {})",
            seed,
            scene.obstacles.len(),
            scene.hole.x,
            scene.hole.y
        );

        Ok(Self::with_scene(seed, arena, tuning, ball, scene))
    }

    /// Build a session around an explicit scene (tests, replays)
    pub fn with_scene(seed: u64, arena: Vec2, tuning: Tuning, ball: Ball, scene: Scene) -> Self {
        Self {
            seed,
            arena,
            tuning,
            ball,
            obstacles: scene.obstacles,
            hole: scene.hole,
            collisions: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            gesture: Gesture::Idle,
        }
    }

    /// Feed one input event through the gesture mapper
    ///
    /// A release while dragging sets the ball velocity; quit ends the session.
    pub fn apply_input(&mut self, event: InputEvent) -> Option<GameEvent> {
        match event {
            InputEvent::Quit => {
                self.phase = GamePhase::Quit;
                None
            }
            InputEvent::Press(point) => {
                self.gesture.press(point);
                None
            }
            InputEvent::Motion(point) => {
                self.gesture.motion(point);
                None
            }
            InputEvent::Release => {
                let delta = self.gesture.release()?;
                let velocity = impulse(delta, self.tuning.launch_power);
                self.ball.vel = velocity;
                log::debug!("Launch: drag {:?} -> velocity {:?}", delta, velocity);
                Some(GameEvent::Launched { velocity })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_playing_at_centre() {
        let state = GameState::new(12345, &Settings::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert!(state.ball.is_at_rest());
        assert_eq!(state.collisions, 0);
        assert_eq!(state.obstacles.len(), 8);
        assert_eq!(state.hole.w, 10.0);
    }

    #[test]
    fn test_gesture_sets_velocity() {
        let mut state = GameState::new(1, &Settings::default()).unwrap();
        state.apply_input(InputEvent::Press(Vec2::new(100.0, 100.0)));
        state.apply_input(InputEvent::Motion(Vec2::new(70.0, 130.0)));
        let event = state.apply_input(InputEvent::Release);

        assert!(matches!(event, Some(GameEvent::Launched { .. })));
        assert!((state.ball.vel.x - 3.0).abs() < 1e-5);
        assert!((state.ball.vel.y + 3.0).abs() < 1e-5);
        assert_eq!(state.gesture, Gesture::Idle);
    }

    #[test]
    fn test_stray_release_keeps_velocity() {
        let mut state = GameState::new(1, &Settings::default()).unwrap();
        state.ball.vel = Vec2::new(2.0, 1.0);
        assert_eq!(state.apply_input(InputEvent::Release), None);
        assert_eq!(state.ball.vel, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_quit_is_terminal() {
        let mut state = GameState::new(1, &Settings::default()).unwrap();
        state.apply_input(InputEvent::Quit);
        assert_eq!(state.phase, GamePhase::Quit);
        assert!(state.phase.is_terminal());
    }
}
