mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use cronmon_core::config::{load_dotenv, Config};

use crate::cli::{CliArgs, Command};
use crate::commands::Outcome;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let config = Config::from_env();
    config.log_summary();

    match run(args, &config) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: CliArgs, config: &Config) -> Result<ExitCode> {
    match args.command {
        Command::Validate(validate) => {
            let outcome = commands::validate(&validate, config)?;
            println!("{}", outcome.to_json(validate.pretty)?);
            Ok(match outcome {
                Outcome::Valid(_) => ExitCode::SUCCESS,
                Outcome::Invalid(_) => ExitCode::from(1),
            })
        }
        Command::Aliases => {
            print!("{}", commands::aliases());
            Ok(ExitCode::SUCCESS)
        }
    }
}
