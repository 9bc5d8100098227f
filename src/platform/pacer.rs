//! Frame timing

use std::time::{Duration, Instant};

/// Clock plus blocking delay used to pace the frame loop
pub trait Pacer {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock and `thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
