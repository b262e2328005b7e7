//! Domain errors for the contact reward engine.

use thiserror::Error;

/// Domain-level errors that can occur while running an episode.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Malformed observation: expected {expected} values, got {actual}")]
    MalformedObservation { expected: usize, actual: usize },

    #[error("Advisor unavailable: {0}")]
    AdvisorUnavailable(String),

    #[error("Episode not started: call reset() before step()")]
    EpisodeNotStarted,

    #[error("Episode finished at step {0}: call reset() to start a new one")]
    EpisodeFinished(u64),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
