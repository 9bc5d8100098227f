//! Click-drag-release gesture tracking
//!
//! Pressing the primary button anchors a drag, motion updates the drag delta,
//! and releasing turns the delta into a launch impulse pointing the other way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete input events from the platform (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed / quit requested
    Quit,
    /// Primary button pressed at a point
    Press(Vec2),
    /// Pointer moved to a point
    Motion(Vec2),
    /// Primary button released
    Release,
}

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Gesture {
    #[default]
    Idle,
    /// Button held since `origin`; `delta` is pointer minus origin
    Dragging { origin: Vec2, delta: Vec2 },
}

impl Gesture {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging { .. })
    }

    /// Current drag delta, zero when idle
    pub fn delta(&self) -> Vec2 {
        match self {
            Gesture::Idle => Vec2::ZERO,
            Gesture::Dragging { delta, .. } => *delta,
        }
    }

    /// Start (or restart) a drag at `point`
    pub fn press(&mut self, point: Vec2) {
        *self = Gesture::Dragging {
            origin: point,
            delta: Vec2::ZERO,
        };
    }

    /// Track pointer motion; ignored unless dragging
    pub fn motion(&mut self, point: Vec2) {
        if let Gesture::Dragging { origin, delta } = self {
            *delta = point - *origin;
        }
    }

    /// Finish the drag, returning the final delta (None when idle)
    pub fn release(&mut self) -> Option<Vec2> {
        match std::mem::take(self) {
            Gesture::Dragging { delta, .. } => Some(delta),
            Gesture::Idle => None,
        }
    }
}

/// Launch velocity for a drag delta: opposite the drag, scaled by `power`
///
/// No clamping is applied, so long drags produce fast shots.
#[inline]
pub fn impulse(delta: Vec2, power: f32) -> Vec2 {
    -delta * power
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_release_produces_opposite_impulse() {
        let mut gesture = Gesture::default();
        gesture.press(Vec2::new(100.0, 100.0));
        gesture.motion(Vec2::new(70.0, 130.0));
        assert_eq!(gesture.delta(), Vec2::new(-30.0, 30.0));

        let delta = gesture.release().unwrap();
        let vel = impulse(delta, 0.1);
        assert!((vel.x - 3.0).abs() < 1e-5);
        assert!((vel.y + 3.0).abs() < 1e-5);
        assert_eq!(gesture, Gesture::Idle);
    }

    #[test]
    fn test_motion_while_idle_is_ignored() {
        let mut gesture = Gesture::Idle;
        gesture.motion(Vec2::new(50.0, 50.0));
        assert_eq!(gesture, Gesture::Idle);
        assert_eq!(gesture.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_release_while_idle_yields_nothing() {
        let mut gesture = Gesture::Idle;
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn test_press_without_motion_is_zero_impulse() {
        let mut gesture = Gesture::Idle;
        gesture.press(Vec2::new(10.0, 10.0));
        assert!(gesture.is_dragging());
        assert_eq!(gesture.release(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_second_press_reanchors() {
        let mut gesture = Gesture::Idle;
        gesture.press(Vec2::new(10.0, 10.0));
        gesture.motion(Vec2::new(40.0, 10.0));
        gesture.press(Vec2::new(200.0, 200.0));
        assert_eq!(gesture.delta(), Vec2::ZERO);
        gesture.motion(Vec2::new(190.0, 220.0));
        assert_eq!(gesture.delta(), Vec2::new(-10.0, 20.0));
    }

    #[test]
    fn test_impulse_is_unclamped() {
        let vel = impulse(Vec2::new(-5000.0, 0.0), 0.1);
        assert!((vel.x - 500.0).abs() < 1e-3);
    }
}
