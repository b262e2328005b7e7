//! Implementation of the `contact-reward run` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use comfy_table::Cell;
use console::style;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::advisor::{AnthropicApiAdvisor, MockAdvisor};
use crate::adapters::physics::KinematicPhysics;
use crate::adapters::policy::{RandomPolicy, ScriptedPolicy};
use crate::application::{run_episodes, ContactEnv, EpisodeSummary};
use crate::cli::output::progress::{create_progress_bar, ProgressBarExt};
use crate::cli::output::table::{list_table, number_cell};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::domain::ports::{Advisor, Policy};
use crate::services::AdvisorBridge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Seeded uniform-random actions
    Random,
    /// Descend to contact, then retract and lift
    Scripted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdvisorMode {
    /// No advisor: no lateral penalty, no terminal score
    Off,
    /// Fixed-score local advisor
    Mock,
    /// Anthropic Messages API
    Api,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Number of episodes to roll out
    #[arg(short, long, default_value = "1")]
    pub episodes: usize,

    /// Action policy
    #[arg(short, long, value_enum, default_value = "scripted")]
    pub policy: PolicyKind,

    /// Seed for reset perturbation and the random policy (overrides physics.seed)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Advisor to use (defaults to api when advisor.enabled, otherwise off)
    #[arg(short, long, value_enum)]
    pub advisor: Option<AdvisorMode>,

    /// Score returned by the mock advisor
    #[arg(long, default_value = "5.0")]
    pub mock_score: f64,

    /// Episode length override
    #[arg(short, long)]
    pub length: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub policy: String,
    pub advisor: Option<String>,
    pub episodes: Vec<EpisodeSummary>,
    pub mean_reward: f64,
    pub discovered: usize,
}

impl RunOutput {
    fn new(policy: &str, advisor: Option<&str>, episodes: Vec<EpisodeSummary>) -> Self {
        let mean_reward = if episodes.is_empty() {
            0.0
        } else {
            episodes.iter().map(|e| e.total_reward).sum::<f64>() / episodes.len() as f64
        };
        let discovered = episodes.iter().filter(|e| e.discovered_at.is_some()).count();
        Self {
            policy: policy.to_string(),
            advisor: advisor.map(str::to_string),
            episodes,
            mean_reward,
            discovered,
        }
    }
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&[
            "#",
            "steps",
            "reward",
            "phase",
            "discovered at",
            "ended by",
            "advisor",
        ]);
        for episode in &self.episodes {
            table.add_row(vec![
                number_cell(episode.index + 1),
                number_cell(episode.steps),
                number_cell(format!("{:.2}", episode.total_reward)),
                Cell::new(episode.phase),
                number_cell(
                    episode
                        .discovered_at
                        .map_or_else(|| "-".to_string(), |step| step.to_string()),
                ),
                Cell::new(
                    episode
                        .termination
                        .map_or_else(|| "-".to_string(), |reason| reason.to_string()),
                ),
                number_cell(format!("{:.1}", episode.advisor_score)),
            ]);
        }

        format!(
            "{} episode(s), policy {}, advisor {}\n{}\n\nmean reward {}, discovered in {}/{}",
            style(self.episodes.len()).bold(),
            self.policy,
            self.advisor.as_deref().unwrap_or("off"),
            table,
            style(format!("{:.2}", self.mean_reward)).bold(),
            self.discovered,
            self.episodes.len()
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn build_advisor(mode: AdvisorMode, args: &RunArgs, config: &Config) -> Result<Option<Arc<dyn Advisor>>> {
    let advisor: Arc<dyn Advisor> = match mode {
        AdvisorMode::Off => return Ok(None),
        AdvisorMode::Mock => Arc::new(MockAdvisor::scoring(args.mock_score)),
        AdvisorMode::Api => {
            if config.advisor.resolved_api_key().is_none() {
                anyhow::bail!("Advisor mode 'api' needs advisor.api_key or ANTHROPIC_API_KEY");
            }
            Arc::new(
                AnthropicApiAdvisor::from_config(&config.advisor)
                    .context("Failed to create advisor client")?,
            )
        }
    };
    Ok(Some(advisor))
}

pub async fn execute(args: RunArgs, mut config: Config, json_mode: bool) -> Result<()> {
    if let Some(seed) = args.seed {
        config.physics.seed = seed;
    }
    if let Some(length) = args.length {
        anyhow::ensure!(length > 0, "Episode length must be at least 1");
        config.episode.length = length;
    }

    let mode = args.advisor.unwrap_or(if config.advisor.enabled {
        AdvisorMode::Api
    } else {
        AdvisorMode::Off
    });
    let advisor = build_advisor(mode, &args, &config)?;
    let advisor_name = advisor.as_ref().map(|a| a.name());

    let physics = KinematicPhysics::new(&config.physics);
    let mut env = ContactEnv::new(physics, config.episode.clone());
    if let Some(advisor) = advisor {
        let timeout = Duration::from_secs(config.advisor.timeout_secs);
        env = env.with_advisor(AdvisorBridge::new(advisor, timeout));
    }

    let mut policy: Box<dyn Policy> = match args.policy {
        PolicyKind::Random => Box::new(RandomPolicy::new(config.physics.seed.wrapping_add(1))),
        PolicyKind::Scripted => Box::new(ScriptedPolicy::new()),
    };
    let policy_name = policy.name();

    let pb = create_progress_bar(args.episodes as u64, json_mode);
    let result = run_episodes(&mut env, policy.as_mut(), args.episodes, |summary| {
        pb.set_message(format!("reward {:.1}", summary.total_reward));
        pb.inc(1);
    })
    .await;

    let summaries = match result {
        Ok(summaries) => {
            pb.finish_success("rollout complete");
            summaries
        }
        Err(err) => {
            pb.finish_error("rollout failed");
            return Err(err).context("Rollout failed");
        }
    };

    output(&RunOutput::new(policy_name, advisor_name, summaries), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Phase, TerminationReason};
    use chrono::Utc;
    use uuid::Uuid;

    fn summary(index: usize, reward: f64, discovered_at: Option<u64>) -> EpisodeSummary {
        EpisodeSummary {
            index,
            episode_id: Uuid::new_v4(),
            steps: 10,
            total_reward: reward,
            phase: Phase::Searching,
            discovered_at,
            termination: Some(TerminationReason::HorizonReached),
            advisor_score: 0.0,
            started_at: Utc::now(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_run_output_aggregates() {
        let out = RunOutput::new(
            "scripted",
            None,
            vec![summary(0, -10.0, None), summary(1, 30.0, Some(4))],
        );
        assert!((out.mean_reward - 10.0).abs() < 1e-12);
        assert_eq!(out.discovered, 1);

        let human = out.to_human();
        assert!(human.contains("horizon"));
        assert!(human.contains("advisor off"));

        let json = out.to_json();
        assert_eq!(json["episodes"].as_array().unwrap().len(), 2);
        assert_eq!(json["discovered"], 1);
    }

    #[test]
    fn test_empty_run_output() {
        let out = RunOutput::new("random", Some("mock"), vec![]);
        assert_eq!(out.mean_reward, 0.0);
    }

    #[test]
    fn test_api_mode_requires_key() {
        let args = RunArgs {
            episodes: 1,
            policy: PolicyKind::Scripted,
            seed: None,
            advisor: Some(AdvisorMode::Api),
            mock_score: 5.0,
            length: None,
        };
        temp_env::with_var_unset("ANTHROPIC_API_KEY", || {
            assert!(build_advisor(AdvisorMode::Api, &args, &Config::default()).is_err());
        });
        assert!(build_advisor(AdvisorMode::Off, &args, &Config::default())
            .unwrap()
            .is_none());
        let mock = build_advisor(AdvisorMode::Mock, &args, &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(mock.name(), "mock");
    }

    #[tokio::test]
    async fn test_execute_scripted_json() {
        let args = RunArgs {
            episodes: 2,
            policy: PolicyKind::Scripted,
            seed: Some(3),
            advisor: Some(AdvisorMode::Mock),
            mock_score: 9.0,
            length: Some(600),
        };
        execute(args, Config::default(), true).await.unwrap();
    }
}
