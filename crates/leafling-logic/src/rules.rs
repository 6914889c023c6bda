//! Tuning constants for the care simulation.
//!
//! Everything numeric lives here or on the action/stage tables in
//! [`crate::care`] and [`crate::growth`], so the engine, the view layer,
//! and the tests all read the same numbers.

/// Upper bound for plant health.
pub const MAX_HEALTH: f32 = 100.0;

/// Health a freshly planted seed starts with.
pub const INITIAL_HEALTH: f32 = 80.0;

/// Wall-clock period between passive decay steps.
pub const TICK_INTERVAL_MS: u64 = 2_000;

/// Health lost per decay step while alive.
pub const DECAY_PER_TICK: f32 = 0.5;

/// Health subtracted from [`INITIAL_HEALTH`] when a dead plant is revived.
pub const REVIVAL_HEALTH_PENALTY: f32 = 50.0;

/// Factor applied to every action cooldown once a plant has been revived.
pub const REVIVAL_COOLDOWN_MULTIPLIER: u64 = 2;

/// Longest accepted plant name, in characters, after trimming.
pub const NAME_MAX_CHARS: usize = 15;

/// Health a plant comes back with after revival. Floored at 1 so a revival
/// can never produce an already-dead plant, whatever the penalty is tuned to.
pub fn revival_health() -> f32 {
    (INITIAL_HEALTH - REVIVAL_HEALTH_PENALTY).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revival_health_value() {
        assert!((revival_health() - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn revival_health_never_dead() {
        assert!(revival_health() >= 1.0);
    }

    #[test]
    fn decay_is_positive() {
        assert!(DECAY_PER_TICK > 0.0);
        assert!(TICK_INTERVAL_MS > 0);
    }

    #[test]
    fn initial_health_within_bounds() {
        assert!(INITIAL_HEALTH > 0.0);
        assert!(INITIAL_HEALTH <= MAX_HEALTH);
    }
}
