//! Fixed-rate frame scheduler
//!
//! Each iteration drains input, runs one simulation tick, renders, then sleeps
//! off whatever is left of the frame budget. Slow frames are not caught up:
//! the loop just runs slower.

use std::time::Duration;

use thiserror::Error;

use crate::platform::{Pacer, Platform, PlatformError};
use crate::renderer;
use crate::settings::{Settings, SettingsError};
use crate::sim::{GamePhase, GameState, InputEvent, SceneGenerationError, tick};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("scene generation failed: {0}")]
    Scene(#[from] SceneGenerationError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Won,
    Quit,
}

/// Final numbers for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub outcome: SessionOutcome,
    pub collisions: u64,
    /// Loop iterations run
    pub frames: u64,
}

/// Drives a `GameState` at a fixed target rate
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    /// Target duration of one iteration
    pub frame_duration: Duration,
    /// Pause kept on screen after a win
    pub win_pause: Duration,
}

impl FrameScheduler {
    pub fn new(frame_duration: Duration, win_pause: Duration) -> Self {
        Self {
            frame_duration,
            win_pause,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.frame_duration(), settings.win_pause())
    }

    /// Run until the ball is sunk or the player quits
    pub fn run<P, C>(
        &self,
        state: &mut GameState,
        platform: &mut P,
        pacer: &mut C,
    ) -> Result<SessionSummary, PlatformError>
    where
        P: Platform + ?Sized,
        C: Pacer + ?Sized,
    {
        let mut events: Vec<InputEvent> = Vec::new();
        let mut frames = 0u64;

        while !state.phase.is_terminal() {
            let frame_start = pacer.now();
            frames += 1;

            platform.poll_events(&mut events)?;
            let mut quit_requested = false;
            for event in events.drain(..) {
                match event {
                    InputEvent::Quit => quit_requested = true,
                    event => {
                        state.apply_input(event);
                    }
                }
            }

            // Quit lets the current iteration finish; a win from this tick stands
            tick(state);
            if quit_requested && !state.phase.is_terminal() {
                state.phase = GamePhase::Quit;
            }
            platform.present(&renderer::scene(state))?;

            let elapsed = pacer.now().saturating_duration_since(frame_start);
            if let Some(remaining) = self.frame_duration.checked_sub(elapsed) {
                if !remaining.is_zero() {
                    pacer.sleep(remaining);
                }
            } else {
                log::warn!(
                    "Frame {} took {:?}, over the {:?} budget",
                    frames,
                    elapsed,
                    self.frame_duration
                );
            }
        }

        let outcome = match state.phase {
            GamePhase::Won => {
                pacer.sleep(self.win_pause);
                SessionOutcome::Won
            }
            _ => SessionOutcome::Quit,
        };
        log::info!(
            "Session over: {:?} after {} frames, {} collisions",
            outcome,
            frames,
            state.collisions
        );

        Ok(SessionSummary {
            outcome,
            collisions: state.collisions,
            frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Instant;

    use glam::Vec2;

    use super::*;
    use crate::renderer::DrawList;
    use crate::sim::{Ball, Rect, Scene};
    use crate::tuning::Tuning;

    /// Virtual clock shared between the fake platform and the fake pacer
    #[derive(Clone)]
    struct Clock {
        base: Instant,
        offset: Rc<Cell<Duration>>,
    }

    impl Clock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Rc::new(Cell::new(Duration::ZERO)),
            }
        }

        fn advance(&self, by: Duration) {
            self.offset.set(self.offset.get() + by);
        }
    }

    struct FakePacer {
        clock: Clock,
        sleeps: Vec<Duration>,
    }

    impl Pacer for FakePacer {
        fn now(&self) -> Instant {
            self.clock.base + self.clock.offset.get()
        }

        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
            self.clock.advance(duration);
        }
    }

    /// Scripted input per frame; rendering costs `render_cost` of virtual time
    struct FakePlatform {
        clock: Clock,
        script: VecDeque<Vec<InputEvent>>,
        render_cost: Duration,
        presented: usize,
        last_frame: Option<DrawList>,
    }

    impl Platform for FakePlatform {
        fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), PlatformError> {
            let batch = self.script.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]);
            out.extend(batch);
            Ok(())
        }

        fn present(&mut self, frame: &DrawList) -> Result<(), PlatformError> {
            self.presented += 1;
            self.clock.advance(self.render_cost);
            self.last_frame = Some(frame.clone());
            Ok(())
        }
    }

    fn fixtures(
        script: Vec<Vec<InputEvent>>,
        render_cost: Duration,
    ) -> (FakePlatform, FakePacer) {
        let clock = Clock::new();
        let platform = FakePlatform {
            clock: clock.clone(),
            script: script.into(),
            render_cost,
            presented: 0,
            last_frame: None,
        };
        let pacer = FakePacer {
            clock,
            sleeps: Vec::new(),
        };
        (platform, pacer)
    }

    fn open_state(hole: Rect) -> GameState {
        let scene = Scene {
            obstacles: vec![],
            hole,
        };
        GameState::with_scene(
            0,
            Vec2::new(800.0, 600.0),
            Tuning::default(),
            Ball::new(Vec2::new(400.0, 300.0), 10.0),
            scene,
        )
    }

    fn scheduler() -> FrameScheduler {
        FrameScheduler::new(Duration::from_millis(16), Duration::from_secs(2))
    }

    #[test]
    fn test_pads_fast_frames_to_target() {
        let mut state = open_state(Rect::new(10.0, 10.0, 10.0, 10.0));
        let (mut platform, mut pacer) =
            fixtures(vec![vec![], vec![]], Duration::from_millis(4));

        let summary = scheduler().run(&mut state, &mut platform, &mut pacer).unwrap();

        assert_eq!(summary.outcome, SessionOutcome::Quit);
        // Two scripted frames plus the frame that reads the quit
        assert_eq!(summary.frames, 3);
        assert_eq!(platform.presented, 3);
        assert_eq!(pacer.sleeps, vec![Duration::from_millis(12); 3]);
    }

    #[test]
    fn test_slow_frames_are_not_padded() {
        let mut state = open_state(Rect::new(10.0, 10.0, 10.0, 10.0));
        let (mut platform, mut pacer) = fixtures(vec![vec![]], Duration::from_millis(25));

        scheduler().run(&mut state, &mut platform, &mut pacer).unwrap();
        assert!(pacer.sleeps.is_empty());
    }

    #[test]
    fn test_quit_finishes_current_iteration() {
        let mut state = open_state(Rect::new(10.0, 10.0, 10.0, 10.0));
        state.ball.pos = Vec2::new(0.0, 300.0);
        state.ball.vel = Vec2::new(-2.0, 0.0);
        let (mut platform, mut pacer) = fixtures(vec![vec![InputEvent::Quit]], Duration::ZERO);

        let summary = scheduler().run(&mut state, &mut platform, &mut pacer).unwrap();

        assert_eq!(summary.frames, 1);
        assert_eq!(summary.outcome, SessionOutcome::Quit);
        assert_eq!(platform.presented, 1);
        assert_eq!(state.phase, GamePhase::Quit);
        // The tick still ran: friction, move, left-wall bounce
        assert_eq!(state.time_ticks, 1);
        assert!((state.ball.pos.x + 1.9).abs() < 1e-4);
        assert!((state.ball.vel.x - 1.9).abs() < 1e-4);
        assert_eq!(summary.collisions, 1);
    }

    #[test]
    fn test_win_in_quit_frame_counts_as_win() {
        let mut state = open_state(Rect::new(780.0, 580.0, 10.0, 10.0));
        state.ball.pos = Vec2::new(770.0, 580.0);
        state.ball.vel = Vec2::new(10.0, 0.0);
        let (mut platform, mut pacer) = fixtures(vec![vec![InputEvent::Quit]], Duration::ZERO);

        let summary = scheduler().run(&mut state, &mut platform, &mut pacer).unwrap();

        assert_eq!(summary.outcome, SessionOutcome::Won);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(pacer.sleeps.last(), Some(&Duration::from_secs(2)));
    }

    #[test]
    fn test_drag_release_launches_into_hole() {
        // Hole 40 units to the right of the ball; drag left to shoot right
        let mut state = open_state(Rect::new(440.0, 300.0, 10.0, 10.0));
        let mut script = vec![
            vec![InputEvent::Press(Vec2::new(100.0, 100.0))],
            vec![InputEvent::Motion(Vec2::new(50.0, 100.0))],
            vec![InputEvent::Release],
        ];
        // Idle frames while the ball rolls; running out would quit
        script.extend((0..60).map(|_| Vec::new()));
        let (mut platform, mut pacer) = fixtures(script, Duration::from_millis(1));

        let summary = scheduler().run(&mut state, &mut platform, &mut pacer).unwrap();

        assert_eq!(summary.outcome, SessionOutcome::Won);
        assert_eq!(summary.collisions, 0);
        assert_eq!(pacer.sleeps.last(), Some(&Duration::from_secs(2)));
        let frame = platform.last_frame.unwrap();
        assert_eq!(frame.status, "collisions: 0");
    }

    #[test]
    fn test_aim_arrow_rendered_while_dragging() {
        let mut state = open_state(Rect::new(10.0, 10.0, 10.0, 10.0));
        let script = vec![
            vec![
                InputEvent::Press(Vec2::new(100.0, 100.0)),
                InputEvent::Motion(Vec2::new(130.0, 100.0)),
            ],
            vec![InputEvent::Quit],
        ];
        let (mut platform, mut pacer) = fixtures(script, Duration::ZERO);

        scheduler().run(&mut state, &mut platform, &mut pacer).unwrap();
        assert!(state.gesture.is_dragging());
        let frame = platform.last_frame.unwrap();
        assert!(
            frame
                .commands
                .iter()
                .any(|c| matches!(c, crate::renderer::DrawCommand::Line { .. }))
        );
    }
}
