//! The plant itself: core state, naming, passive decay, and revival.

use serde::{Deserialize, Serialize};

use crate::growth::{self, GrowthStage};
use crate::rules;

/// Everything that persists about a single plant.
///
/// An empty `name` marks the uninitialized sentinel: no plant has been
/// adopted yet, and the state waits at its starting values. `stage` is
/// always derivable from `care_points`; it is stored so snapshots and
/// views never have to recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    pub name: String,
    pub health: f32,
    pub stage: GrowthStage,
    pub care_points: f32,
}

impl PlantState {
    /// The pre-adoption sentinel. Health sits at the starting value so the
    /// first view after onboarding shows a fresh plant.
    pub fn uninitialized() -> PlantState {
        PlantState {
            name: String::new(),
            health: rules::INITIAL_HEALTH,
            stage: GrowthStage::Seed,
            care_points: 0.0,
        }
    }

    /// A freshly adopted plant with the given (already validated) name.
    pub fn planted(name: impl Into<String>) -> PlantState {
        PlantState {
            name: name.into(),
            ..PlantState::uninitialized()
        }
    }

    /// Whether a plant has been adopted. Anything with an empty name is the
    /// sentinel and must not tick or take care actions.
    pub fn is_initialized(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

impl Default for PlantState {
    fn default() -> Self {
        PlantState::uninitialized()
    }
}

/// Why a proposed plant name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong,
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameError::Empty => write!(f, "plant name must not be empty"),
            NameError::TooLong => write!(
                f,
                "plant name longer than {} characters",
                rules::NAME_MAX_CHARS
            ),
        }
    }
}

impl std::error::Error for NameError {}

/// Trim and check a proposed name. Whitespace-only input counts as empty;
/// length is measured in characters, not bytes.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.chars().count() > rules::NAME_MAX_CHARS {
        return Err(NameError::TooLong);
    }
    Ok(trimmed.to_string())
}

/// One passive decay step. Dead plants are left untouched; death is
/// terminal until an explicit revival. Health floors at zero.
pub fn decay_tick(state: &PlantState) -> PlantState {
    if state.is_dead() {
        return state.clone();
    }
    PlantState {
        health: (state.health - rules::DECAY_PER_TICK).max(0.0),
        ..state.clone()
    }
}

/// Outcome of [`revive`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReviveOutcome {
    Revived(PlantState),
    /// The plant was alive; reviving a living plant is a no-op.
    RejectedAlive,
}

impl ReviveOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, ReviveOutcome::Revived(_))
    }
}

/// Bring a dead plant back at penalized health. Growth progress survives
/// death: care points and stage carry over unchanged.
pub fn revive(state: &PlantState) -> ReviveOutcome {
    if !state.is_dead() {
        return ReviveOutcome::RejectedAlive;
    }
    ReviveOutcome::Revived(PlantState {
        health: rules::revival_health(),
        ..state.clone()
    })
}
