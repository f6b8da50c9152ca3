//! Command-line interface definitions.

pub mod check;
pub mod diagnostic;
pub mod output;
pub mod score;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::Config;
use crate::error::Result;

/// econe-risk - Fraud risk scoring for carbon-offset projects.
#[derive(Parser, Debug)]
#[command(name = "econe-risk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the risk scoring API (foreground)
    Serve(ServeArgs),

    /// Score a single payload and print the result as JSON
    Score(ScoreArgs),

    /// Validate configuration and report classifier status
    Check(CheckArgs),
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Override listen address (e.g. 0.0.0.0:8000)
    #[arg(long)]
    pub bind: Option<String>,

    /// Override model artifact path
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `score` subcommand.
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Payload file; reads stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Override model artifact path
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Also print the derived feature row
    #[arg(long)]
    pub features: bool,

    /// Apply request validation before scoring
    #[arg(long)]
    pub validate: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Override model artifact path
    #[arg(long)]
    pub model: Option<PathBuf>,
}

/// Load the configuration named on the command line, or the defaults.
#[allow(clippy::result_large_err)]
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::from_env(),
    }
}
