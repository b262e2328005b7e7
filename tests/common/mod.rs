//! Common test utilities for integration tests
//!
//! Physics doubles and sensor-frame builders shared by the scenario,
//! property and advisor tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use contact_reward::adapters::advisor::MockAdvisor;
use contact_reward::domain::models::{Action, EpisodeConfig};
use contact_reward::domain::ports::Physics;
use contact_reward::{AdvisorBridge, ContactEnv};
use std::sync::Arc;
use std::time::Duration;

/// Physics double that replays queued sensor vectors.
///
/// Once the queue runs dry every further tick returns `fallback`.
pub struct ReplayPhysics {
    frames: VecDeque<Vec<f64>>,
    fallback: Vec<f64>,
    pub actions: Vec<Action>,
    pub resets: usize,
}

impl ReplayPhysics {
    pub fn new(frames: Vec<Vec<f64>>) -> Self {
        Self {
            frames: frames.into(),
            fallback: rest_frame(),
            actions: Vec::new(),
            resets: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: Vec<f64>) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Physics for ReplayPhysics {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn reset(&mut self) -> Vec<f64> {
        self.resets += 1;
        rest_frame()
    }

    fn advance(&mut self, action: &Action) -> Vec<f64> {
        self.actions.push(*action);
        self.frames
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Sensor vector from position, velocity and force triples.
pub fn frame(position: [f64; 3], velocity: [f64; 3], force: [f64; 3]) -> Vec<f64> {
    let mut raw = Vec::with_capacity(9);
    raw.extend_from_slice(&position);
    raw.extend_from_slice(&velocity);
    raw.extend_from_slice(&force);
    raw
}

/// Motionless, contact-free sensor vector at the origin.
pub fn rest_frame() -> Vec<f64> {
    vec![0.0; 9]
}

/// Environment over replayed frames with the advisor disabled.
pub fn replay_env(frames: Vec<Vec<f64>>, length: u64) -> ContactEnv<ReplayPhysics> {
    ContactEnv::new(ReplayPhysics::new(frames), EpisodeConfig { length })
}

/// Environment over replayed frames with a fixed-score mock advisor.
pub fn advised_env(
    frames: Vec<Vec<f64>>,
    length: u64,
    advisor: Arc<MockAdvisor>,
) -> ContactEnv<ReplayPhysics> {
    replay_env(frames, length).with_advisor(AdvisorBridge::new(advisor, Duration::from_secs(5)))
}

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
