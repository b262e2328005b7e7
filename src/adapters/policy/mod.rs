//! Policy adapters used by rollouts.

pub mod random;
pub mod scripted;

pub use random::RandomPolicy;
pub use scripted::{ScriptStage, ScriptedPolicy};
