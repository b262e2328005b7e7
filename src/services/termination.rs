//! Termination policy.
//!
//! `done` marks a fatal stop (non-finite sensors, or retreat past the
//! termination distance). `truncated` marks a horizon or policy stop (step
//! counter at the episode length, or the same retreat). Both can be set.

use crate::domain::models::shaping::TERMINATION_LATERAL_DISTANCE;
use crate::domain::models::{EpisodeState, TerminationReason};

/// Termination flags for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Termination {
    pub done: bool,
    pub truncated: bool,
    /// Highest-priority cause when either flag is set.
    pub reason: Option<TerminationReason>,
}

impl Termination {
    pub const fn is_terminal(&self) -> bool {
        self.done || self.truncated
    }
}

/// Decide termination from this tick's observation health and state.
pub fn evaluate(observation_finite: bool, state: &EpisodeState, episode_length: u64) -> Termination {
    let withdrawn = state.lateral_distance > TERMINATION_LATERAL_DISTANCE;
    let horizon = state.step_index >= episode_length;

    let done = !observation_finite || withdrawn;
    let truncated = horizon || withdrawn;

    let reason = if !observation_finite {
        Some(TerminationReason::NonFiniteObservation)
    } else if withdrawn {
        Some(TerminationReason::WithdrawalLimit)
    } else if horizon {
        Some(TerminationReason::HorizonReached)
    } else {
        None
    };

    Termination {
        done,
        truncated,
        reason,
    }
}
