//! Command handlers.

use super::commands::{Commands, OutputFormat};
use pacekeeper::{
    InMemoryMetricsDatastore, JsonError, PacekeeperConfig, PacekeeperResult, RateLimiter,
    quota_report, tier_summaries,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Load the configuration from `path`, or from the layered defaults.
fn load_config(path: Option<&Path>) -> PacekeeperResult<PacekeeperConfig> {
    match path {
        Some(path) => PacekeeperConfig::from_file(path),
        None => PacekeeperConfig::load(),
    }
}

/// Dispatch a parsed command.
pub fn handle_command(command: Commands, config_path: Option<&Path>) -> PacekeeperResult<()> {
    debug!(?command, config_path = ?config_path, "Handling command");
    match command {
        Commands::Tiers { format } => list_tiers(config_path, format),
        Commands::Tier { method } => show_tier(config_path, &method),
        Commands::Quota {
            team,
            method,
            channel,
            format,
        } => show_quota(config_path, &team, &method, channel.as_deref(), format),
        Commands::Config { file } => show_config(file.as_deref().or(config_path)),
    }
}

fn print_json<T: Serialize>(value: &T) -> PacekeeperResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn list_tiers(config_path: Option<&Path>, format: OutputFormat) -> PacekeeperResult<()> {
    let config = load_config(config_path)?;
    let registry = config.tier_registry()?;
    let summaries = tier_summaries(&registry);

    match format {
        OutputFormat::Json => print_json(&summaries)?,
        OutputFormat::Human => {
            for summary in &summaries {
                println!(
                    "{} ({} per minute, {} methods)",
                    summary.tier,
                    summary.allowed_per_minute,
                    summary.methods.len()
                );
                println!("{:-<80}", "");
                for method in &summary.methods {
                    println!("  {}", method);
                }
                println!();
            }
            println!("Unknown methods use {}", registry.default_tier());
        }
    }
    Ok(())
}

fn show_tier(config_path: Option<&Path>, method: &str) -> PacekeeperResult<()> {
    let registry = load_config(config_path)?.tier_registry()?;
    let tier = registry.lookup_tier(method);
    let note = if registry.is_known(method) {
        ""
    } else {
        " (not catalogued, default tier)"
    };
    println!(
        "{}: {}{}, {} requests per minute",
        method,
        tier,
        note,
        registry.allowed_requests_per_minute(tier)
    );
    Ok(())
}

fn show_quota(
    config_path: Option<&Path>,
    team: &str,
    method: &str,
    channel: Option<&str>,
    format: OutputFormat,
) -> PacekeeperResult<()> {
    let config = load_config(config_path)?;
    let limiter = RateLimiter::from_config(&config, Arc::new(InMemoryMetricsDatastore::new()))?;
    let report = quota_report(&limiter, team, method, channel)?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Human => {
            let scope = match &report.channel_id {
                Some(channel) => format!("team {} channel {}", report.team_id, channel),
                None => format!("team {}", report.team_id),
            };
            println!("{} for {}", report.method, scope);
            println!("  tier:     {}", report.tier);
            println!("  default:  {} per minute", report.tier_allowed_per_minute);
            println!("  in force: {} per minute", report.allowed_per_minute);
        }
    }
    Ok(())
}

fn show_config(path: Option<&Path>) -> PacekeeperResult<()> {
    let config = load_config(path)?;
    print_json(&config)
}
