//! Seeded uniform-random policy.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::models::{Action, Observation};
use crate::domain::ports::Policy;

/// Draws every action component uniformly from [-1, 1].
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn act(&mut self, _observation: &Observation) -> Action {
        Action::new(
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Vec3;

    fn rest() -> Observation {
        Observation::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
    }

    #[test]
    fn test_actions_are_bounded() {
        let mut policy = RandomPolicy::new(7);
        for _ in 0..500 {
            let action = policy.act(&rest());
            assert!(action.components().iter().all(|v| (-1.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_same_seed_same_actions() {
        let mut a = RandomPolicy::new(3);
        let mut b = RandomPolicy::new(3);
        for _ in 0..10 {
            assert_eq!(a.act(&rest()), b.act(&rest()));
        }
    }
}
