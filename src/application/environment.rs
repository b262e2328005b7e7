//! The episode driver.
//!
//! `ContactEnv` owns the physics collaborator and the episode state, and runs
//! the reward core in a fixed order on every tick:
//!
//! 1. advance the physics and slice the sensor vector
//! 2. update the force filter
//! 3. apply phase transitions
//! 4. append the advisor transcript record (advisor enabled only)
//! 5. compose the reward
//! 6. evaluate termination, and on a terminal tick settle the advisor score
//!
//! All state changes of a tick are made before `step` returns.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Action, EpisodeConfig, EpisodeState, Observation, Phase, StepOutcome,
};
use crate::domain::ports::Physics;
use crate::services::{force_filter, phase_machine, reward_composer, termination, AdvisorBridge};

/// Reward and termination environment around a physics collaborator.
pub struct ContactEnv<P: Physics> {
    physics: P,
    episode: EpisodeConfig,
    advisor: Option<AdvisorBridge>,
    state: EpisodeState,
    episode_id: Option<Uuid>,
    finished: bool,
}

impl<P: Physics> ContactEnv<P> {
    /// Create an environment with the advisor disabled.
    pub fn new(physics: P, episode: EpisodeConfig) -> Self {
        Self {
            physics,
            episode,
            advisor: None,
            state: EpisodeState::new(),
            episode_id: None,
            finished: false,
        }
    }

    /// Enable the advisor for every following episode.
    #[must_use]
    pub fn with_advisor(mut self, bridge: AdvisorBridge) -> Self {
        self.advisor = Some(bridge);
        self
    }

    pub const fn advisor_enabled(&self) -> bool {
        self.advisor.is_some()
    }

    pub const fn state(&self) -> &EpisodeState {
        &self.state
    }

    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Id of the running episode; `None` before the first reset.
    pub const fn episode_id(&self) -> Option<Uuid> {
        self.episode_id
    }

    pub const fn episode_length(&self) -> u64 {
        self.episode.length
    }

    /// Whether the last step ended the episode.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    pub const fn physics(&self) -> &P {
        &self.physics
    }

    /// Start a new episode and return its initial observation.
    ///
    /// Clears every per-episode field regardless of how the previous episode
    /// ended. Fails only if the physics hands back a vector of the wrong
    /// length.
    #[instrument(skip(self), fields(physics = self.physics.name()))]
    pub fn reset(&mut self) -> DomainResult<Observation> {
        self.state.reset();
        self.finished = false;

        let raw = self.physics.reset();
        let observation = Observation::from_raw(&raw)?;

        let episode_id = Uuid::new_v4();
        self.episode_id = Some(episode_id);
        debug!(
            %episode_id,
            position = %observation.position,
            advisor = self.advisor.as_ref().map(AdvisorBridge::advisor_name),
            "episode reset"
        );
        Ok(observation)
    }

    /// Advance one tick.
    ///
    /// Malformed or non-finite sensor data ends the episode with `done` set
    /// rather than raising. Errors are returned only for stepping before the
    /// first reset or after a terminal tick.
    #[instrument(skip(self, action), fields(episode_id = ?self.episode_id, step = self.state.step_index + 1))]
    pub async fn step(&mut self, action: &Action) -> DomainResult<StepOutcome> {
        if self.episode_id.is_none() {
            return Err(DomainError::EpisodeNotStarted);
        }
        if self.finished {
            return Err(DomainError::EpisodeFinished(self.state.step_index));
        }

        let raw = self.physics.advance(action);
        self.state.step_index += 1;
        let step_index = self.state.step_index;

        let observation = Observation::from_raw(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "unusable sensor vector");
            Observation::non_finite()
        });
        let observation_finite = observation.is_finite();

        let reading = force_filter::update(self.state.force_ema, &observation.force);
        self.state.force_magnitude = reading.magnitude;
        self.state.force_ema = reading.ema;

        let fired = phase_machine::advance(&mut self.state, &observation);

        if let Some(bridge) = &self.advisor {
            bridge.record(&mut self.state.transcript, step_index, &observation);
        }

        let mut components =
            reward_composer::compose(&self.state, fired, &observation, self.advisor.is_some());

        let termination = termination::evaluate(observation_finite, &self.state, self.episode.length);
        if termination.is_terminal() {
            if let Some(bridge) = &self.advisor {
                components.advisor_score = bridge.settle(&self.state.transcript).await;
            }
            self.finished = true;
        }

        let components = if observation_finite {
            components.saturated()
        } else {
            components.sanitized()
        };
        let reward = components.total();

        if let Some(reason) = termination.reason {
            info!(
                step = step_index,
                reason = %reason,
                phase = %self.state.phase,
                done = termination.done,
                truncated = termination.truncated,
                "episode ended"
            );
        }

        Ok(StepOutcome {
            observation,
            reward,
            done: termination.done,
            truncated: termination.truncated,
            phase: self.state.phase,
            components,
            termination: termination.reason,
        })
    }
}
