//! CLI type definitions
//!
//! Clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::config::ConfigArgs;
use super::commands::init::InitArgs;
use super::commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "contact-reward")]
#[command(about = "Phase-based reward shaping for force-feedback extraction episodes", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .contact-reward/
    #[arg(short, long, global = true, env = "CONTACT_REWARD_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default project configuration
    Init(InitArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Roll out episodes against the built-in kinematic scene
    Run(RunArgs),
}
