//! Mock advisor for testing and dry runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::Advisor;

/// How the mock answers.
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Return this score immediately.
    Score(f64),
    /// Fail with this message.
    Fail(String),
    /// Return `score` after sleeping for `delay`.
    Delayed { score: f64, delay: Duration },
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self::Score(5.0)
    }
}

/// Mock advisor that records what it was asked.
#[derive(Debug, Default)]
pub struct MockAdvisor {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_transcript: Mutex<Option<String>>,
}

impl MockAdvisor {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_transcript: Mutex::new(None),
        }
    }

    pub fn scoring(score: f64) -> Self {
        Self::new(MockBehavior::Score(score))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }

    /// Number of times `score` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Transcript passed to the most recent call.
    pub fn last_transcript(&self) -> Option<String> {
        self.last_transcript
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Advisor for MockAdvisor {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn score(&self, transcript: &str) -> DomainResult<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_transcript.lock() {
            *last = Some(transcript.to_string());
        }

        match &self.behavior {
            MockBehavior::Score(score) => Ok(*score),
            MockBehavior::Fail(message) => Err(DomainError::AdvisorUnavailable(message.clone())),
            MockBehavior::Delayed { score, delay } => {
                tokio::time::sleep(*delay).await;
                Ok(*score)
            }
        }
    }
}
