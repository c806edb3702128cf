//! VCTT CLI - run the scoring pipeline from the command line.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use vctt_cli::commands;
use vctt_cli::{logging, Cli, Command, Config};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init(&config.log_level);

    match cli.command {
        Command::Analyze(args) => {
            let succeeded = commands::execute_analyze(args, config).await?;
            // The error body is already on stdout
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Config => {
            commands::execute_config(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
