//! Scene clock
//!
//! Wall time is supplied by the host (frame timestamps in milliseconds), so
//! tests can inject any elapsed value.

use std::time::Duration;

/// Elapsed wall time since the scene activated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    start_ms: f64,
    now_ms: f64,
}

impl Clock {
    /// Start the clock at the given host timestamp
    pub fn start(start_ms: f64) -> Self {
        Self {
            start_ms,
            now_ms: start_ms,
        }
    }

    /// Advance to a new host timestamp. Earlier timestamps are ignored so
    /// elapsed time never goes backwards.
    pub fn advance_to(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.now_ms - self.start_ms
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        (self.elapsed_ms() / 1000.0) as f32
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_ms() / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_from_start() {
        let mut clock = Clock::start(1_000.0);
        assert_eq!(clock.elapsed_ms(), 0.0);

        clock.advance_to(3_500.0);
        assert_eq!(clock.elapsed_ms(), 2_500.0);
        assert!((clock.elapsed_secs() - 2.5).abs() < 1e-6);
        assert_eq!(clock.elapsed(), Duration::from_millis(2_500));
    }

    #[test]
    fn test_monotonic() {
        let mut clock = Clock::start(0.0);
        clock.advance_to(500.0);
        clock.advance_to(200.0);
        assert_eq!(clock.elapsed_ms(), 500.0);
    }
}
