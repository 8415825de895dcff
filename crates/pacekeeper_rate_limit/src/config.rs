//! Configuration structures for request pacing.
//!
//! This module provides TOML-based configuration. The configuration system
//! supports:
//! - Bundled defaults (include_str! from pacekeeper.toml)
//! - User overrides (./pacekeeper.toml or ~/.config/pacekeeper/pacekeeper.toml)
//! - `PACEKEEPER_*` environment variables for top-level scalars, so each
//!   process sharing a credential can pick its own `executor_name`

use crate::{RateLimitTier, TierRegistry, registry::DEFAULT_UNKNOWN_METHOD_TIER};
use config::{Config, Environment, File, FileFormat};
use pacekeeper_error::{ConfigError, PacekeeperResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Custom quotas for one per-channel method family within a team.
///
/// # Example
///
/// ```toml
/// [overrides.teams.T123.chat_post_message]
/// default = 30
/// channels = { C123 = 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ChannelOverrides {
    /// Quota for every channel of the team without its own entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<u32>,

    /// Channel id to allowed requests per minute
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub channels: HashMap<String, u32>,
}

impl ChannelOverrides {
    /// Quota for a channel: its own entry, else the family default.
    pub fn for_channel(&self, channel_id: &str) -> Option<u32> {
        self.channels.get(channel_id).copied().or(self.default)
    }

    fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.default.into_iter().chain(self.channels.values().copied())
    }
}

/// Custom quotas for a single team.
///
/// # Example
///
/// ```toml
/// [overrides.teams.T123.methods]
/// "conversations.history" = 10
///
/// [overrides.teams.T123.assistant_threads_set_status]
/// default = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct TeamOverrides {
    /// Method name to allowed requests per minute
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub methods: HashMap<String, u32>,

    /// Overrides for posting messages, per channel
    #[serde(default)]
    pub chat_post_message: ChannelOverrides,

    /// Overrides for assistant thread status updates, per channel
    #[serde(default)]
    pub assistant_threads_set_status: ChannelOverrides,
}

/// Operator-supplied quotas that win over tier defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct OverridesConfig {
    /// Team id to that team's overrides
    #[serde(default)]
    pub teams: HashMap<String, TeamOverrides>,
}

/// Top-level pacekeeper configuration.
///
/// Loads configuration from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from pacekeeper.toml)
/// 2. User config in home directory (~/.config/pacekeeper/pacekeeper.toml)
/// 3. User config in current directory (./pacekeeper.toml)
/// 4. `PACEKEEPER_EXECUTOR_NAME`, `PACEKEEPER_FAIL_OPEN`, ... environment variables
///
/// # Example
///
/// ```
/// use pacekeeper_rate_limit::PacekeeperConfig;
///
/// let config = PacekeeperConfig::builder()
///     .executor_name("worker-7")
///     .fail_open(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.executor_name(), "worker-7");
/// assert!(config.validate().is_ok());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Deserialize,
    Serialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct PacekeeperConfig {
    /// Stable name of this process among those sharing a credential
    executor_name: String,

    /// Treat metrics store and resolver failures as "nothing recorded"
    fail_open: bool,

    /// Share of the per-node quota at which usage is logged as approaching
    approaching_ratio: f64,

    /// Tier for methods missing from the catalogue
    default_tier: RateLimitTier,

    /// Tier quota replacements, applied once when the registry is built
    tiers: HashMap<RateLimitTier, u32>,

    /// Per-team and per-channel custom quotas
    overrides: OverridesConfig,
}

/// Executor name used when none is configured.
pub const DEFAULT_EXECUTOR_NAME: &str = "default-executor";

/// Approaching ratio used when none is configured.
pub const DEFAULT_APPROACHING_RATIO: f64 = 0.8;

impl Default for PacekeeperConfig {
    fn default() -> Self {
        Self {
            executor_name: DEFAULT_EXECUTOR_NAME.to_string(),
            fail_open: false,
            approaching_ratio: DEFAULT_APPROACHING_RATIO,
            default_tier: DEFAULT_UNKNOWN_METHOD_TIER,
            tiers: HashMap::new(),
            overrides: OverridesConfig::default(),
        }
    }
}

impl PacekeeperConfig {
    /// Creates a new config builder.
    pub fn builder() -> PacekeeperConfigBuilder {
        PacekeeperConfigBuilder::default()
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PacekeeperResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> PacekeeperResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../pacekeeper.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/pacekeeper/pacekeeper.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("pacekeeper").required(false))
            .add_source(Environment::with_prefix("PACEKEEPER"));

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        info!(
            executor_name = %config.executor_name,
            fail_open = config.fail_open,
            teams_with_overrides = config.overrides.teams.len(),
            "Loaded pacekeeper configuration"
        );
        Ok(config)
    }

    /// Check every quota is positive and every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first offending setting.
    pub fn validate(&self) -> PacekeeperResult<()> {
        if self.executor_name.trim().is_empty() {
            return Err(ConfigError::new("executor_name must not be empty").into());
        }
        if !(self.approaching_ratio > 0.0 && self.approaching_ratio <= 1.0) {
            return Err(ConfigError::new(format!(
                "approaching_ratio must be in (0.0, 1.0], got {}",
                self.approaching_ratio
            ))
            .into());
        }
        if self.default_tier.is_special() {
            return Err(ConfigError::new(format!(
                "default_tier must be a generic tier, got {}",
                self.default_tier
            ))
            .into());
        }
        if let Some((tier, _)) = self.tiers.iter().find(|(_, allowed)| **allowed == 0) {
            return Err(ConfigError::new(format!(
                "allowed requests per minute for {} must be positive",
                tier
            ))
            .into());
        }
        for (team_id, team) in &self.overrides.teams {
            let has_zero = team.methods.values().any(|v| *v == 0)
                || team.chat_post_message.values().any(|v| v == 0)
                || team.assistant_threads_set_status.values().any(|v| v == 0);
            if has_zero {
                return Err(ConfigError::new(format!(
                    "custom quotas for team {} must be positive",
                    team_id
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Build the immutable tier registry this configuration describes.
    pub fn tier_registry(&self) -> PacekeeperResult<TierRegistry> {
        TierRegistry::with_overrides(&self.tiers, self.default_tier)
    }
}
