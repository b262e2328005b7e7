//! Reward core services.
//!
//! Each component is a plain function (or a thin struct) over the episode
//! state; the environment calls them in a fixed order every tick.

pub mod advisor_bridge;
pub mod force_filter;
pub mod phase_machine;
pub mod reward_composer;
pub mod termination;

pub use advisor_bridge::{fold_score, transcript_record, AdvisorBridge};
pub use force_filter::ForceReading;
pub use phase_machine::Transitions;
pub use termination::Termination;
