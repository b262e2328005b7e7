//! Result of a single environment tick.

use serde::{Deserialize, Serialize};

use super::episode::Phase;
use super::observation::Observation;
use super::reward::RewardComponents;

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// A sensor channel was NaN/infinite, or the raw vector was malformed.
    NonFiniteObservation,
    /// Lateral retreat passed the termination distance.
    WithdrawalLimit,
    /// The step counter reached the episode length.
    HorizonReached,
}

impl TerminationReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NonFiniteObservation => "non_finite_observation",
            Self::WithdrawalLimit => "withdrawal_limit",
            Self::HorizonReached => "horizon_reached",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything returned to the training loop for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Observation after the physics advanced.
    pub observation: Observation,
    /// Scalar reward, the sum of `components`.
    pub reward: f64,
    /// Fatal stop: non-finite sensors or withdrawal limit.
    pub done: bool,
    /// Horizon or policy-driven stop.
    pub truncated: bool,
    /// Phase after this tick's transitions.
    pub phase: Phase,
    /// Reward breakdown.
    pub components: RewardComponents,
    /// Primary termination cause, if the episode ended on this tick.
    pub termination: Option<TerminationReason>,
}

impl StepOutcome {
    /// Whether the episode is over after this tick.
    pub const fn is_terminal(&self) -> bool {
        self.done || self.truncated
    }
}
