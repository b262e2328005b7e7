//! Contact Reward - phase-based reward shaping for force-feedback extraction
//!
//! A reward and termination engine for a robot end effector that probes a
//! soft medium for an embedded object and withdraws it. Each tick the engine
//! reads nine sensor channels (position, velocity and contact force), smooths
//! the force, advances a `Searching → Discovered → Withdrawing` phase machine
//! and returns a shaped reward with `done`/`truncated` flags. An optional
//! external advisor scores the whole episode transcript on the terminal tick.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, shaping constants and port traits
//! - **Service Layer** (`services`): force filter, phase machine, reward
//!   composer, termination policy, advisor bridge
//! - **Application Layer** (`application`): the `ContactEnv` episode driver
//!   and policy rollouts
//! - **Adapters** (`adapters`): advisor, physics and policy implementations
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use contact_reward::adapters::physics::KinematicPhysics;
//! use contact_reward::application::ContactEnv;
//! use contact_reward::domain::models::{Action, EpisodeConfig, Phase, PhysicsConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), contact_reward::domain::DomainError> {
//! let physics = KinematicPhysics::new(&PhysicsConfig::default());
//! let mut env = ContactEnv::new(physics, EpisodeConfig { length: 10 });
//!
//! env.reset()?;
//! let outcome = env.step(&Action::new(0.0, 0.0, -1.0)).await?;
//! assert_eq!(outcome.phase, Phase::Searching);
//! assert!(!outcome.is_terminal());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{ContactEnv, EpisodeSummary};
pub use domain::models::{
    Action, Config, EpisodeConfig, EpisodeState, Observation, Phase, RewardComponents,
    StepOutcome, TerminationReason, Vec3,
};
pub use domain::ports::{Advisor, Physics, Policy};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::AdvisorBridge;
