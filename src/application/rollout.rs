//! Policy rollouts over a [`ContactEnv`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::environment::ContactEnv;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Phase, TerminationReason};
use crate::domain::ports::{Physics, Policy};

/// What happened in one finished episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    /// Zero-based position in the rollout.
    pub index: usize,
    pub episode_id: Uuid,
    pub steps: u64,
    pub total_reward: f64,
    /// Phase at the final tick.
    pub phase: Phase,
    /// Tick on which the object was found, if it was.
    pub discovered_at: Option<u64>,
    pub termination: Option<TerminationReason>,
    /// Terminal advisor contribution (zero with the advisor disabled).
    pub advisor_score: f64,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Play one episode to its terminal tick.
#[instrument(skip(env, policy), fields(policy = policy.name()))]
pub async fn run_episode<P, Q>(
    env: &mut ContactEnv<P>,
    policy: &mut Q,
    index: usize,
) -> DomainResult<EpisodeSummary>
where
    P: Physics,
    Q: Policy + ?Sized,
{
    let started_at = Utc::now();
    let mut observation = env.reset()?;
    let episode_id = env.episode_id().ok_or(DomainError::EpisodeNotStarted)?;
    policy.begin_episode();

    let mut total_reward = 0.0;
    let mut discovered_at = None;
    loop {
        let action = policy.act(&observation);
        let outcome = env.step(&action).await?;
        total_reward += outcome.reward;
        if discovered_at.is_none() && outcome.components.discovery_bonus > 0.0 {
            discovered_at = Some(env.state().step_index);
        }
        observation = outcome.observation;

        if outcome.is_terminal() {
            let summary = EpisodeSummary {
                index,
                episode_id,
                steps: env.state().step_index,
                total_reward,
                phase: outcome.phase,
                discovered_at,
                termination: outcome.termination,
                advisor_score: outcome.components.advisor_score,
                started_at,
                duration_ms: u64::try_from((Utc::now() - started_at).num_milliseconds())
                    .unwrap_or(0),
            };
            info!(
                episode = index,
                steps = summary.steps,
                total_reward = summary.total_reward,
                phase = %summary.phase,
                "episode finished"
            );
            return Ok(summary);
        }
    }
}

/// Play `episodes` episodes back to back, reporting each one as it finishes.
pub async fn run_episodes<P, Q, F>(
    env: &mut ContactEnv<P>,
    policy: &mut Q,
    episodes: usize,
    mut on_episode: F,
) -> DomainResult<Vec<EpisodeSummary>>
where
    P: Physics,
    Q: Policy + ?Sized,
    F: FnMut(&EpisodeSummary),
{
    let mut summaries = Vec::with_capacity(episodes);
    for index in 0..episodes {
        let summary = run_episode(env, policy, index).await?;
        on_episode(&summary);
        summaries.push(summary);
    }
    Ok(summaries)
}
