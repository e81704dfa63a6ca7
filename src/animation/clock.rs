use std::time::{Duration, Instant};

/// Monotonic clock feeding frame timestamps to the sequencer
///
/// Timestamps are offsets from the moment the clock was created, so
/// transitions can be driven with plain `Duration`s in tests.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = FrameClock::start();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
