//! Advisor adapters.

pub mod anthropic_api;
pub mod errors;
pub mod mock;

pub use anthropic_api::{AnthropicAdvisorConfig, AnthropicApiAdvisor};
pub use errors::AdvisorApiError;
pub use mock::{MockAdvisor, MockBehavior};
