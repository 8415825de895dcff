//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a console tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_directives` is used
/// (for example `"info,pacekeeper=debug"`).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_directives: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    tracing::debug!(default_directives, "Tracing initialized");
    Ok(())
}
