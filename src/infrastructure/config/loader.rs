use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project directory holding configuration files
pub const CONFIG_DIR: &str = ".contact-reward";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CONTACT_REWARD_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid episode length: {0}. Must be at least 1")]
    InvalidEpisodeLength(u64),

    #[error("Invalid advisor timeout: {0}s. Must be at least 1")]
    InvalidAdvisorTimeout(u64),

    #[error("Advisor model cannot be empty when the advisor is enabled")]
    EmptyAdvisorModel,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid perturbation: {0}. Must be finite and non-negative")]
    InvalidPerturbation(f64),

    #[error("Invalid timestep: {0}. Must be finite and positive")]
    InvalidTimestep(f64),

    #[error("Invalid frame_skip: {0}. Must be at least 1")]
    InvalidFrameSkip(u32),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .contact-reward/config.yaml (project config, created by init)
    /// 3. .contact-reward/local.yaml (local overrides, optional)
    /// 4. Environment variables (CONTACT_REWARD_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The full provider chain used by [`ConfigLoader::load`].
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("config.yaml")))
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.episode.length == 0 {
            return Err(ConfigError::InvalidEpisodeLength(config.episode.length));
        }

        if config.advisor.timeout_secs == 0 {
            return Err(ConfigError::InvalidAdvisorTimeout(config.advisor.timeout_secs));
        }

        if config.advisor.enabled && config.advisor.model.trim().is_empty() {
            return Err(ConfigError::EmptyAdvisorModel);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        let physics = &config.physics;
        if !physics.perturbation.is_finite() || physics.perturbation < 0.0 {
            return Err(ConfigError::InvalidPerturbation(physics.perturbation));
        }

        if !physics.timestep.is_finite() || physics.timestep <= 0.0 {
            return Err(ConfigError::InvalidTimestep(physics.timestep));
        }

        if physics.frame_skip == 0 {
            return Err(ConfigError::InvalidFrameSkip(physics.frame_skip));
        }

        Ok(())
    }
}
