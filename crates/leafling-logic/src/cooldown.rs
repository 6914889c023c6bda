//! Per-action cooldown ledger.
//!
//! Cooldowns are stored as absolute "available again at" timestamps, one
//! fixed slot per care action. A zero slot means the action has never been
//! used and is immediately available.

use serde::{Deserialize, Serialize};

use crate::care::CareAction;
use crate::rules;

/// Milliseconds since the Unix epoch; the engine-wide time unit.
pub type TimestampMs = u64;

/// Fixed ledger of "available again at" timestamps, one per care action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownLedger {
    water: TimestampMs,
    feed: TimestampMs,
    sunlight: TimestampMs,
    prune: TimestampMs,
}

impl CooldownLedger {
    /// Ledger with every action immediately available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute timestamp at which `action` becomes available again.
    pub fn ready_at(&self, action: CareAction) -> TimestampMs {
        match action {
            CareAction::Water => self.water,
            CareAction::Feed => self.feed,
            CareAction::Sunlight => self.sunlight,
            CareAction::Prune => self.prune,
        }
    }

    /// Copy of this ledger with one slot replaced.
    pub fn with_entry(mut self, action: CareAction, ready_at: TimestampMs) -> Self {
        match action {
            CareAction::Water => self.water = ready_at,
            CareAction::Feed => self.feed = ready_at,
            CareAction::Sunlight => self.sunlight = ready_at,
            CareAction::Prune => self.prune = ready_at,
        }
        self
    }

    /// Milliseconds until `action` is available; 0 means available now.
    pub fn remaining(&self, action: CareAction, now: TimestampMs) -> u64 {
        self.ready_at(action).saturating_sub(now)
    }

    /// Whether `action` can be used at `now`.
    pub fn is_ready(&self, action: CareAction, now: TimestampMs) -> bool {
        self.remaining(action, now) == 0
    }
}

/// Cooldown duration for `action`, doubled once the plant has been revived.
pub fn effective_cooldown_ms(action: CareAction, revived: bool) -> u64 {
    let base = action.base_cooldown_ms();
    if revived {
        base * rules::REVIVAL_COOLDOWN_MULTIPLIER
    } else {
        base
    }
}
