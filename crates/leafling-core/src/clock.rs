//! Time sources for the engine.
//!
//! The engine never reads the wall clock itself; callers pass a timestamp
//! into every transition. These helpers cover the two common sources: the
//! real system clock for apps, and a hand-advanced clock for tests.

pub use leafling_logic::cooldown::TimestampMs;

/// Anything that can report the current time in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> TimestampMs;
}

/// Wall-clock time as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> TimestampMs {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as TimestampMs)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to. Used throughout the tests.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: TimestampMs,
}

impl ManualClock {
    pub fn new(start: TimestampMs) -> ManualClock {
        ManualClock { now: start }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> TimestampMs {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_reports_nonzero() {
        assert!(SystemClock.now_ms() > 0);
    }

    #[test]
    fn test_manual_clock_advances() {
        let mut clock = ManualClock::new(1_000);
        assert_eq!(clock.now_ms(), 1_000);
        clock.advance(2_500);
        assert_eq!(clock.now_ms(), 3_500);
    }
}
