//! Elapsed-time measurement.

use std::time::Instant;

/// Stopwatch measuring milliseconds since the last [`start`](ElapsedTimer::start).
///
/// Reading never blocks; long-running effects poll it every iteration.
pub trait ElapsedTimer {
    /// Reset the reference point to now.
    fn start(&mut self);

    /// Milliseconds since the last `start`.
    fn elapsed_ms(&self) -> u64;
}

/// Host timer backed by the monotonic clock.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicTimer {
    started: Instant,
}

impl MonotonicTimer {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTimer for MonotonicTimer {
    fn start(&mut self) {
        self.started = Instant::now();
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn elapsed_grows_and_restarts() {
        let mut timer = MonotonicTimer::new();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 10);

        let before = timer.elapsed_ms();
        timer.start();
        assert!(timer.elapsed_ms() < before);
    }
}
