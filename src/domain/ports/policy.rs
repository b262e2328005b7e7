//! Policy port - interface for whatever picks actions during a rollout.

use crate::domain::models::{Action, Observation};

/// Trait for action-selection policies.
pub trait Policy: Send {
    /// Get the policy type name.
    fn name(&self) -> &'static str;

    /// Called once at the start of every episode.
    fn begin_episode(&mut self) {}

    /// Choose the next action from the latest observation.
    fn act(&mut self, observation: &Observation) -> Action;
}
