//! contact-reward CLI entry point.

use clap::Parser;

use contact_reward::cli::commands::{config, init, run};
use contact_reward::cli::{handle_error, load_config, Cli, Commands};
use contact_reward::domain::models::Config;
use contact_reward::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        // init must work even over a broken project config
        Err(_) if matches!(cli.command, Commands::Init(_)) => Config::default(),
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => init::execute(args, cli.json).await,
        Commands::Config(args) => config::execute(&args, &config, cli.json),
        Commands::Run(args) => run::execute(args, config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
