//! Status messages the plant "says" based on its condition.

use leafling_logic::condition::Condition;

const HEALTHY: [&str; 5] = [
    "Feeling vibrant.",
    "Basking in gentle care.",
    "Content and thriving.",
    "Radiating quiet strength.",
    "Life is serene.",
];

const THIRSTY: [&str; 4] = [
    "A little thirsty.",
    "The air feels dry.",
    "Dreaming of a cool drink.",
    "Some water would be wonderful.",
];

const WEAK: [&str; 4] = [
    "Feeling a bit faint.",
    "Energy is low.",
    "Could use some attention.",
    "A little weary.",
];

const DYING: [&str; 3] = ["Fading slowly.", "Holding on.", "Everything is quiet now."];

const DEAD: [&str; 1] = ["In a deep, quiet rest."];

/// All the messages a plant in this condition can say.
pub fn message_pool(condition: Condition) -> &'static [&'static str] {
    match condition {
        Condition::Healthy => &HEALTHY,
        Condition::Thirsty => &THIRSTY,
        Condition::Weak => &WEAK,
        Condition::Dying => &DYING,
        Condition::Dead => &DEAD,
    }
}

/// Pick one message from the condition's pool.
pub fn status_message(condition: Condition, rng: &mut impl rand::Rng) -> &'static str {
    let pool = message_pool(condition);
    pool[rng.gen_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_condition_has_messages() {
        for condition in Condition::ALL {
            assert!(!message_pool(condition).is_empty());
        }
    }

    #[test]
    fn test_picked_message_comes_from_pool() {
        let mut rng = rand::thread_rng();
        for condition in Condition::ALL {
            for _ in 0..20 {
                let message = status_message(condition, &mut rng);
                assert!(message_pool(condition).contains(&message));
            }
        }
    }

    #[test]
    fn test_dead_message_is_fixed() {
        let mut rng = rand::thread_rng();
        assert_eq!(
            status_message(Condition::Dead, &mut rng),
            "In a deep, quiet rest."
        );
    }
}
