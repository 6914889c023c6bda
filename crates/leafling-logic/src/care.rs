//! Care actions, their effect tables, and the action-application transition.

use serde::{Deserialize, Serialize};

use crate::cooldown::{self, CooldownLedger, TimestampMs};
use crate::growth::{self, GrowthStage};
use crate::plant::PlantState;
use crate::rules;

/// The four care actions a keeper can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareAction {
    Water,
    Feed,
    Sunlight,
    Prune,
}

impl CareAction {
    /// All actions in display order.
    pub const ALL: [CareAction; 4] = [
        CareAction::Water,
        CareAction::Feed,
        CareAction::Sunlight,
        CareAction::Prune,
    ];

    /// Health and care-point gains for this action. Both are non-negative;
    /// actions never hurt the plant.
    pub fn effect(self) -> CareEffect {
        match self {
            CareAction::Water => CareEffect {
                health: 15.0,
                points: 5.0,
            },
            CareAction::Feed => CareEffect {
                health: 10.0,
                points: 10.0,
            },
            CareAction::Sunlight => CareEffect {
                health: 12.0,
                points: 7.0,
            },
            CareAction::Prune => CareEffect {
                health: 5.0,
                points: 15.0,
            },
        }
    }

    /// Base cooldown before this action can be repeated.
    pub fn base_cooldown_ms(self) -> u64 {
        match self {
            CareAction::Water => 60_000,
            CareAction::Feed => 180_000,
            CareAction::Sunlight => 120_000,
            CareAction::Prune => 300_000,
        }
    }

    /// Display name for UI labels.
    pub fn label(self) -> &'static str {
        match self {
            CareAction::Water => "Water",
            CareAction::Feed => "Feed",
            CareAction::Sunlight => "Sunlight",
            CareAction::Prune => "Prune",
        }
    }
}

/// Per-action state gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CareEffect {
    pub health: f32,
    pub points: f32,
}

/// Why a care action was refused. Rejections are ordinary return values,
/// never panics; the caller shows feedback and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The plant is dead; only revival can help it.
    Dead,
    /// The action was used too recently.
    OnCooldown { remaining_ms: u64 },
    /// No plant exists yet (still awaiting onboarding).
    Uninitialized,
}

/// A successfully applied action: the new state plus what the caller needs
/// to animate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareApplied {
    pub state: PlantState,
    pub cooldowns: CooldownLedger,
    /// When this action can be used again.
    pub ready_again_at: TimestampMs,
    /// Set when the action pushed the plant across a growth threshold.
    pub grew_to: Option<GrowthStage>,
}

/// Outcome of [`apply_care`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CareOutcome {
    Applied(CareApplied),
    Rejected(RejectReason),
}

impl CareOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, CareOutcome::Applied(_))
    }

    /// The rejection reason, if the action was refused.
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            CareOutcome::Rejected(reason) => Some(*reason),
            CareOutcome::Applied(_) => None,
        }
    }
}

/// Apply one care action to a living plant.
///
/// Dead plants and actions still on cooldown are rejected without touching
/// anything. On success the health gain is clamped to [`rules::MAX_HEALTH`],
/// care points accumulate, the stage is re-derived from the new total, and
/// the action's ledger slot is stamped with `now + cooldown` (doubled while
/// `revived` is set).
///
/// Callers guarantee a plant exists; the engine layer gates the sentinel.
pub fn apply_care(
    state: &PlantState,
    cooldowns: &CooldownLedger,
    action: CareAction,
    now: TimestampMs,
    revived: bool,
) -> CareOutcome {
    if state.is_dead() {
        return CareOutcome::Rejected(RejectReason::Dead);
    }
    let remaining = cooldowns.remaining(action, now);
    if remaining > 0 {
        return CareOutcome::Rejected(RejectReason::OnCooldown {
            remaining_ms: remaining,
        });
    }

    let effect = action.effect();
    let health = (state.health + effect.health).min(rules::MAX_HEALTH);
    let care_points = state.care_points + effect.points;
    let stage = growth::stage_for_points(care_points);
    let grew_to = if stage > state.stage { Some(stage) } else { None };
    let ready_again_at = now + cooldown::effective_cooldown_ms(action, revived);

    CareOutcome::Applied(CareApplied {
        state: PlantState {
            name: state.name.clone(),
            health,
            stage,
            care_points,
        },
        cooldowns: cooldowns.with_entry(action, ready_again_at),
        ready_again_at,
        grew_to,
    })
}
