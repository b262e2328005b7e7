//! Implementation of the `contact-reward config` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration after all merges
    Show,
}

#[derive(Debug, serde::Serialize)]
pub struct ConfigShowOutput {
    #[serde(flatten)]
    pub config: Config,
    #[serde(skip)]
    pub yaml: String,
}

impl CommandOutput for ConfigShowOutput {
    fn to_human(&self) -> String {
        self.yaml.trim_end().to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: &ConfigArgs, config: &Config, json_mode: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let mut shown = config.clone();
            if shown.advisor.api_key.is_some() {
                shown.advisor.api_key = Some("***".to_string());
            }
            let yaml = serde_yaml::to_string(&shown).context("Failed to render configuration")?;
            output(&ConfigShowOutput { config: shown, yaml }, json_mode);
        }
    }
    Ok(())
}
