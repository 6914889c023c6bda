//! Decay scheduling.
//!
//! The timer tracks a single "next decay due" deadline. Each poll past the
//! deadline fires at most once and reschedules from the current time, so an
//! app that was suspended for an hour takes one decay step on resume, not
//! eighteen hundred. The timer is disarmed while the plant is dead or not
//! yet adopted.

use leafling_logic::cooldown::TimestampMs;
use leafling_logic::rules;

/// One-shot rescheduling timer for decay ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    interval_ms: u64,
    next_due: Option<TimestampMs>,
}

impl TickTimer {
    /// A disarmed timer at the standard decay interval.
    pub fn new() -> TickTimer {
        TickTimer::with_interval(rules::TICK_INTERVAL_MS)
    }

    /// A disarmed timer with a custom interval. Tests use short intervals.
    pub fn with_interval(interval_ms: u64) -> TickTimer {
        TickTimer {
            interval_ms,
            next_due: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the next tick one interval from `now`.
    pub fn arm(&mut self, now: TimestampMs) {
        self.next_due = Some(now + self.interval_ms);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Fire if the deadline has passed. Fires at most once per call and
    /// reschedules from `now`, never from the missed deadline.
    pub fn poll(&mut self, now: TimestampMs) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval_ms);
                true
            }
            _ => false,
        }
    }

    /// Push the deadline out to one interval from `now`, if armed. Hosts
    /// that drive decay directly call this to keep the schedule aligned.
    pub fn reschedule(&mut self, now: TimestampMs) {
        if self.next_due.is_some() {
            self.next_due = Some(now + self.interval_ms);
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        TickTimer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = TickTimer::with_interval(100);
        assert!(!timer.is_armed());
        assert!(!timer.poll(1_000_000));
    }

    #[test]
    fn test_fires_at_deadline_not_before() {
        let mut timer = TickTimer::with_interval(100);
        timer.arm(1_000);
        assert!(!timer.poll(1_099));
        assert!(timer.poll(1_100));
        // Rescheduled from the fire time.
        assert!(!timer.poll(1_150));
        assert!(timer.poll(1_200));
    }

    #[test]
    fn test_long_gap_fires_once() {
        let mut timer = TickTimer::with_interval(100);
        timer.arm(0);
        // Hours later: one fire, then the schedule restarts from now.
        assert!(timer.poll(1_000_000));
        assert!(!timer.poll(1_000_050));
        assert!(timer.poll(1_000_100));
    }

    #[test]
    fn test_cancel_disarms() {
        let mut timer = TickTimer::with_interval(100);
        timer.arm(0);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.poll(10_000));
    }

    #[test]
    fn test_reschedule_only_when_armed() {
        let mut timer = TickTimer::with_interval(100);
        timer.reschedule(500);
        assert!(!timer.is_armed());

        timer.arm(0);
        timer.reschedule(500);
        assert!(!timer.poll(599));
        assert!(timer.poll(600));
    }

    #[test]
    fn test_default_uses_standard_interval() {
        assert_eq!(TickTimer::default().interval_ms(), rules::TICK_INTERVAL_MS);
    }
}
