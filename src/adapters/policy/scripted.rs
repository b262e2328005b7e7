//! Scripted demonstration policy.
//!
//! Descends while creeping forward until the smoothed contact force says the
//! object was hit, then retracts along -X while lifting.

use crate::domain::models::shaping::DISCOVERY_FORCE_THRESHOLD;
use crate::domain::models::{Action, Observation};
use crate::domain::ports::Policy;
use crate::services::force_filter;

/// Stage of the scripted motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStage {
    Descend,
    Retract,
}

/// Hand-written descend-then-retract controller.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    descend: Action,
    retract: Action,
    stage: ScriptStage,
    force_ema: f64,
}

impl Default for ScriptedPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedPolicy {
    pub const fn new() -> Self {
        Self {
            descend: Action::new(-0.4, 0.0, -0.5),
            retract: Action::new(-1.0, 0.0, 0.3),
            stage: ScriptStage::Descend,
            force_ema: 0.0,
        }
    }

    pub const fn stage(&self) -> ScriptStage {
        self.stage
    }
}

impl Policy for ScriptedPolicy {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn begin_episode(&mut self) {
        self.stage = ScriptStage::Descend;
        self.force_ema = 0.0;
    }

    fn act(&mut self, observation: &Observation) -> Action {
        if observation.is_finite() {
            self.force_ema = force_filter::update(self.force_ema, &observation.force).ema;
        }
        if self.stage == ScriptStage::Descend && self.force_ema >= DISCOVERY_FORCE_THRESHOLD {
            self.stage = ScriptStage::Retract;
        }

        match self.stage {
            ScriptStage::Descend => self.descend,
            ScriptStage::Retract => self.retract,
        }
    }
}
