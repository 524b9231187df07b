//! vidpref CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use vidpref::cli::commands::{self, build_service, load_config};
use vidpref::cli::{Cli, Commands};
use vidpref::domain::models::Config;
use vidpref::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = dispatch(cli).await {
        vidpref::cli::handle_error(err, json);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json).await,
        Commands::Run(args) => {
            let (config, _logger) = bootstrap(config_path)?;
            let service = build_service(&config).await?;
            commands::run::execute(args, &service).await
        }
        Commands::Assign(args) => {
            let (config, _logger) = bootstrap(config_path)?;
            let service = build_service(&config).await?;
            commands::assign::execute(args, &service, &config, cli.json).await
        }
        Commands::Prompt(args) => {
            let (config, _logger) = bootstrap(config_path)?;
            commands::prompt::execute(args, &config, cli.json).await
        }
    }
}

/// Loads configuration and installs the logger, which must stay alive
/// until the command finishes.
fn bootstrap(config_path: Option<&Path>) -> Result<(Config, LoggerImpl)> {
    let config = load_config(config_path)?;
    let logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;
    Ok((config, logger))
}
