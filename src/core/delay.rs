/*!
 * Race-Window Delay
 *
 * CPU-bound busy work executed between a buffer cell write and the
 * cursor increment, stretching the interval in which another worker's
 * conflicting access can interleave. Pure spinning under true
 * parallelism; it never yields or blocks.
 */

use std::hint;
use std::time::{Duration, Instant};

/// Deadline-based spin delay
///
/// The accumulator is routed through `hint::black_box` so the loop
/// performs observable work the optimizer cannot remove, unlike the
/// nested empty loops it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinDelay {
    duration: Duration,
}

impl SpinDelay {
    /// Create a delay of the given duration
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Default window: long enough to make interleavings highly
    /// probable on a multi-core host, short enough for quick runs
    pub fn with_defaults() -> Self {
        Self::new(Duration::from_micros(200))
    }

    /// Zero-length delay, for benchmarks and partition-only tests
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Spin until the deadline passes
    pub fn run(&self) {
        if self.duration.is_zero() {
            return;
        }
        let deadline = Instant::now() + self.duration;
        let mut acc: u64 = 0;
        while Instant::now() < deadline {
            acc = hint::black_box(acc.wrapping_add(1));
            hint::spin_loop();
        }
        hint::black_box(acc);
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_takes_at_least_its_duration() {
        let delay = SpinDelay::new(Duration::from_micros(500));
        let start = Instant::now();
        delay.run();
        assert!(start.elapsed() >= Duration::from_micros(500));
    }

    #[test]
    fn test_zero_delay_returns_immediately() {
        let delay = SpinDelay::none();
        let start = Instant::now();
        delay.run();
        // No deadline arithmetic, just a cheap early return
        assert!(start.elapsed() < Duration::from_millis(5));
    }
}
