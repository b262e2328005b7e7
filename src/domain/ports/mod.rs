//! Port trait definitions (Hexagonal Architecture)
//!
//! Interfaces for the collaborators that sit outside the reward core:
//! - Physics: advances the scene and emits sensor vectors
//! - Advisor: scores an episode transcript
//! - Policy: picks actions during rollouts

pub mod advisor;
pub mod physics;
pub mod policy;

pub use advisor::Advisor;
pub use physics::Physics;
pub use policy::Policy;
