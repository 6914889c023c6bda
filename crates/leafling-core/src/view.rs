//! Read-only projection of the engine for hosts and UIs.

use serde::Serialize;

use leafling_logic::care::CareAction;
use leafling_logic::condition::Condition;
use leafling_logic::growth::GrowthStage;

/// Everything a frontend needs to render one frame, resolved against a
/// single timestamp. Serializes cleanly to JSON for web hosts.
#[derive(Debug, Clone, Serialize)]
pub struct PlantView {
    pub name: String,
    /// False until a plant has been adopted; hosts show onboarding instead.
    pub initialized: bool,
    pub health: f32,
    pub max_health: f32,
    pub care_points: f32,
    pub stage: GrowthStage,
    pub condition: Condition,
    pub dead: bool,
    pub revived: bool,
    pub actions: Vec<ActionAvailability>,
}

impl PlantView {
    /// Health as a 0..=1 fraction for progress bars.
    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

/// One care button's state at the view's timestamp.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActionAvailability {
    pub action: CareAction,
    /// Whether performing the action right now would succeed.
    pub ready: bool,
    pub remaining_ms: u64,
}

impl ActionAvailability {
    /// Remaining wait rounded up to whole seconds, for countdown labels.
    /// A 1ms remainder still reads as "1s", never "0s" while gated.
    pub fn remaining_secs(&self) -> u64 {
        (self.remaining_ms + 999) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_secs_rounds_up() {
        let mut avail = ActionAvailability {
            action: CareAction::Water,
            ready: true,
            remaining_ms: 0,
        };
        assert_eq!(avail.remaining_secs(), 0);
        avail.remaining_ms = 1;
        assert_eq!(avail.remaining_secs(), 1);
        avail.remaining_ms = 999;
        assert_eq!(avail.remaining_secs(), 1);
        avail.remaining_ms = 1_000;
        assert_eq!(avail.remaining_secs(), 1);
        avail.remaining_ms = 1_001;
        assert_eq!(avail.remaining_secs(), 2);
    }

    #[test]
    fn test_health_ratio() {
        let view = PlantView {
            name: "Fern".to_string(),
            initialized: true,
            health: 25.0,
            max_health: 100.0,
            care_points: 0.0,
            stage: GrowthStage::Seed,
            condition: Condition::Weak,
            dead: false,
            revived: false,
            actions: Vec::new(),
        };
        assert_eq!(view.health_ratio(), 0.25);
    }

    #[test]
    fn test_view_serializes_to_json() {
        let view = PlantView {
            name: "Fern".to_string(),
            initialized: true,
            health: 80.0,
            max_health: 100.0,
            care_points: 55.0,
            stage: GrowthStage::Sprout,
            condition: Condition::Healthy,
            dead: false,
            revived: false,
            actions: vec![ActionAvailability {
                action: CareAction::Water,
                ready: false,
                remaining_ms: 1_500,
            }],
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Fern");
        assert_eq!(json["stage"], "Sprout");
        assert_eq!(json["condition"], "Healthy");
        assert_eq!(json["actions"][0]["action"], "Water");
        assert_eq!(json["actions"][0]["remaining_ms"], 1_500);
    }
}
