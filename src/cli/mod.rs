//! CLI interface for ticker-stream
//!
//! Provides subcommands for:
//! - `run`: Poll quotes and forward them to Firehose
//! - `config`: Show the effective configuration

mod run;

pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ticker-stream")]
#[command(about = "Polls equity quotes and forwards them to Kinesis Data Firehose")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start polling
    Run(RunArgs),
    /// Show the effective configuration
    Config,
}
