//! Domain models for episodes, observations, and rewards.

pub mod config;
pub mod episode;
pub mod observation;
pub mod reward;
pub mod shaping;
pub mod step;

pub use config::{AdvisorConfig, Config, EpisodeConfig, LoggingConfig, PhysicsConfig};
pub use episode::{DiscoveryPoint, EpisodeState, Phase};
pub use observation::{Action, Observation, Vec3, ACTION_DIM, OBSERVATION_DIM};
pub use reward::RewardComponents;
pub use step::{StepOutcome, TerminationReason};
