//! Advisor port - interface for the external transcript critique service.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Trait for services that score an episode transcript.
///
/// Called at most once per episode, on the terminal tick. Failures are
/// reported as [`crate::domain::DomainError::AdvisorUnavailable`] and never
/// abort the tick.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Get the advisor type name.
    fn name(&self) -> &'static str;

    /// Score a full episode transcript. Higher is better.
    async fn score(&self, transcript: &str) -> DomainResult<f64>;
}
