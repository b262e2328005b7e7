use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Episode configuration
    #[serde(default)]
    pub episode: EpisodeConfig,

    /// External advisor configuration
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Stand-in physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Episode configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EpisodeConfig {
    /// Ticks before an episode is truncated
    #[serde(default = "default_episode_length")]
    pub length: u64,
}

const fn default_episode_length() -> u64 {
    1000
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            length: default_episode_length(),
        }
    }
}

/// Advisor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdvisorConfig {
    /// Whether the advisor penalty and terminal critique are active
    #[serde(default)]
    pub enabled: bool,

    /// Upper bound on a single advisor call, in seconds
    #[serde(default = "default_advisor_timeout_secs")]
    pub timeout_secs: u64,

    /// API base URL
    #[serde(default = "default_advisor_base_url")]
    pub base_url: String,

    /// Model used to score transcripts
    #[serde(default = "default_advisor_model")]
    pub model: String,

    /// Maximum tokens in the advisor reply
    #[serde(default = "default_advisor_max_tokens")]
    pub max_tokens: u32,

    /// API key (falls back to `ANTHROPIC_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

const fn default_advisor_timeout_secs() -> u64 {
    30
}

fn default_advisor_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_advisor_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

const fn default_advisor_max_tokens() -> u32 {
    64
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_secs: default_advisor_timeout_secs(),
            base_url: default_advisor_base_url(),
            model: default_advisor_model(),
            max_tokens: default_advisor_max_tokens(),
            api_key: None,
        }
    }
}

impl AdvisorConfig {
    /// API key from config or environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
    }
}

/// Configuration of the built-in kinematic physics model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhysicsConfig {
    /// RNG seed for reset perturbation
    #[serde(default)]
    pub seed: u64,

    /// Half-width of the uniform reset perturbation
    #[serde(default = "default_perturbation")]
    pub perturbation: f64,

    /// Integration substeps per tick
    #[serde(default = "default_frame_skip")]
    pub frame_skip: u32,

    /// Integration timestep in seconds
    #[serde(default = "default_timestep")]
    pub timestep: f64,
}

const fn default_perturbation() -> f64 {
    0.01
}

const fn default_frame_skip() -> u32 {
    5
}

const fn default_timestep() -> f64 {
    0.002
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            perturbation: default_perturbation(),
            frame_skip: default_frame_skip(),
            timestep: default_timestep(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
