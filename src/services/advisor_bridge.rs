//! Advisor bridge.
//!
//! While the advisor is enabled, every tick appends a text record to the
//! episode transcript. On the terminal tick the full transcript is sent to the
//! advisor once; the returned score is scaled by 10 and either subtracted
//! (at or below the pass mark of 80) or added (above it).
//!
//! Calls are bounded by a timeout. A failed, timed-out, or non-finite score
//! contributes nothing and never fails the tick.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::shaping::{ADVISOR_PASS_MARK, ADVISOR_SCORE_SCALE};
use crate::domain::models::Observation;
use crate::domain::ports::Advisor;

/// Render one tick as a transcript record.
pub fn transcript_record(step_index: u64, observation: &Observation) -> String {
    format!(
        "Step {step_index}:\nCurrent positions: {}.\nCurrent velocities: {}.\nCurrent forces: {}.\n",
        observation.position, observation.velocity, observation.force
    )
}

/// Map a raw advisor score to its signed reward contribution.
pub fn fold_score(raw_score: f64) -> f64 {
    let scaled = raw_score * ADVISOR_SCORE_SCALE;
    if scaled <= ADVISOR_PASS_MARK {
        -scaled
    } else {
        scaled
    }
}

/// Connects an episode to an [`Advisor`] with a bounded wait.
#[derive(Clone)]
pub struct AdvisorBridge {
    advisor: Arc<dyn Advisor>,
    timeout: Duration,
}

impl AdvisorBridge {
    pub fn new(advisor: Arc<dyn Advisor>, timeout: Duration) -> Self {
        Self { advisor, timeout }
    }

    pub fn advisor_name(&self) -> &'static str {
        self.advisor.name()
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Append this tick's record to the transcript.
    pub fn record(&self, transcript: &mut String, step_index: u64, observation: &Observation) {
        transcript.push_str(&transcript_record(step_index, observation));
    }

    /// Ask the advisor for a score, enforcing the timeout and finiteness.
    pub async fn request_score(&self, transcript: &str) -> DomainResult<f64> {
        let score = tokio::time::timeout(self.timeout, self.advisor.score(transcript))
            .await
            .map_err(|_| {
                DomainError::AdvisorUnavailable(format!(
                    "no response within {}s",
                    self.timeout.as_secs_f64()
                ))
            })??;

        if !score.is_finite() {
            return Err(DomainError::AdvisorUnavailable(format!(
                "non-finite score {score}"
            )));
        }
        Ok(score)
    }

    /// Signed terminal contribution for the transcript; zero on any failure.
    pub async fn settle(&self, transcript: &str) -> f64 {
        debug!(
            advisor = self.advisor.name(),
            transcript_bytes = transcript.len(),
            "requesting advisor score"
        );

        match self.request_score(transcript).await {
            Ok(score) => {
                let contribution = fold_score(score);
                info!(
                    advisor = self.advisor.name(),
                    score,
                    contribution,
                    "advisor score applied"
                );
                contribution
            }
            Err(err) => {
                warn!(
                    advisor = self.advisor.name(),
                    error = %err,
                    "advisor score unavailable, contributing zero"
                );
                0.0
            }
        }
    }
}
