//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pacekeeper - inspect tiers, quotas and configuration of the request pacer
#[derive(Parser, Debug)]
#[command(name = "pacekeeper")]
#[command(about = "Inspect rate limit tiers, resolved quotas and pacer configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every tier with its quota and methods
    Tiers {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show the tier and quota of one method
    Tier {
        /// API method name, e.g. conversations.history
        method: String,
    },

    /// Show the quota in force for a team after custom overrides
    Quota {
        /// Team id
        #[arg(long)]
        team: String,

        /// API method name
        #[arg(long)]
        method: String,

        /// Channel id, required for methods paced per channel
        #[arg(long)]
        channel: Option<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Load, validate and print the configuration
    Config {
        /// Configuration file to check (defaults to --config or the layered defaults)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
