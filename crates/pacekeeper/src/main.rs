//! Pacekeeper CLI binary.
//!
//! This binary provides command-line access to Pacekeeper's tier registry:
//! - List tiers and their methods
//! - Look up the tier of a method
//! - Resolve the quota in force for a team after overrides
//! - Validate configuration files

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, handle_command};

    let cli = Cli::parse();

    let directives = if cli.verbose {
        "info,pacekeeper=debug,pacekeeper_rate_limit=debug"
    } else {
        "warn"
    };
    pacekeeper::init_tracing(directives)?;

    handle_command(cli.command, cli.config.as_deref())?;
    Ok(())
}
