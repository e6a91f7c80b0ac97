use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Validate and normalize monitor configurations.
///
/// Reads a monitor payload, resolves its project against a project directory
/// file, and prints either the normalized monitor or the field errors as JSON.
#[derive(Parser, Debug)]
#[command(name = "cronmon", version, about = "Validate and normalize monitor configurations")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a monitor payload (exit 0 when valid, 1 when rejected)
    Validate(ValidateArgs),
    /// Print the crontab alias table
    Aliases,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Monitor payload JSON file, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub payload: String,

    /// Stored monitor JSON; validates the payload as an update of it
    #[arg(long)]
    pub existing: Option<PathBuf>,

    /// Organization scope (default: ORGANIZATION from the environment)
    #[arg(long)]
    pub organization: Option<String>,

    /// Caller whose grants are checked (default: CALLER from the environment)
    #[arg(long)]
    pub caller: Option<String>,

    /// Project directory YAML (default: DIRECTORY_PATH from the environment)
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
