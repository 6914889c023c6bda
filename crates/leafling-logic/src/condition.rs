//! Presentation-level condition bands derived from health.

use serde::{Deserialize, Serialize};

/// How the plant looks to its keeper. Purely derived; nothing stores this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Health above 70.
    Healthy,
    /// Health above 40, up to 70.
    Thirsty,
    /// Health above 10, up to 40.
    Weak,
    /// Health at 10 or below, but still alive.
    Dying,
    /// Health at zero.
    Dead,
}

impl Condition {
    /// All conditions from best to worst.
    pub const ALL: [Condition; 5] = [
        Condition::Healthy,
        Condition::Thirsty,
        Condition::Weak,
        Condition::Dying,
        Condition::Dead,
    ];

    /// Classify a health value. `dead` wins over every band so a plant at
    /// exactly zero never reads as merely dying.
    pub fn from_health(health: f32, dead: bool) -> Condition {
        if dead {
            Condition::Dead
        } else if health > 70.0 {
            Condition::Healthy
        } else if health > 40.0 {
            Condition::Thirsty
        } else if health > 10.0 {
            Condition::Weak
        } else {
            Condition::Dying
        }
    }

    /// Display name for UI labels.
    pub fn label(self) -> &'static str {
        match self {
            Condition::Healthy => "Healthy",
            Condition::Thirsty => "Thirsty",
            Condition::Weak => "Weak",
            Condition::Dying => "Dying",
            Condition::Dead => "Dead",
        }
    }
}
