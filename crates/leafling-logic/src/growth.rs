//! Growth stages and their care-point thresholds.
//!
//! A plant's stage is never stored as an independent fact; it is always
//! derived from accumulated care points via [`stage_for_points`].

use serde::{Deserialize, Serialize};

/// Discrete growth stages, in progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Seed,
    Sprout,
    Young,
    Mature,
    Bloom,
}

impl GrowthStage {
    /// All stages in ascending threshold order.
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seed,
        GrowthStage::Sprout,
        GrowthStage::Young,
        GrowthStage::Mature,
        GrowthStage::Bloom,
    ];

    /// Minimum care points required to reach this stage.
    pub fn threshold(self) -> f32 {
        match self {
            GrowthStage::Seed => 0.0,
            GrowthStage::Sprout => 50.0,
            GrowthStage::Young => 250.0,
            GrowthStage::Mature => 800.0,
            GrowthStage::Bloom => 2000.0,
        }
    }

    /// Display name for UI labels.
    pub fn label(self) -> &'static str {
        match self {
            GrowthStage::Seed => "Seed",
            GrowthStage::Sprout => "Sprout",
            GrowthStage::Young => "Young",
            GrowthStage::Mature => "Mature",
            GrowthStage::Bloom => "Bloom",
        }
    }
}

/// Highest stage whose threshold is met by `care_points`.
///
/// Care points only grow outside a full reset, so the derived stage is
/// monotonic over a plant's lifetime even while health swings.
pub fn stage_for_points(care_points: f32) -> GrowthStage {
    let mut stage = GrowthStage::Seed;
    for candidate in GrowthStage::ALL {
        if care_points >= candidate.threshold() {
            stage = candidate;
        }
    }
    stage
}
