//! Application layer: the episode driver and rollouts built on it.

pub mod environment;
pub mod rollout;

pub use environment::ContactEnv;
pub use rollout::{run_episode, run_episodes, EpisodeSummary};
