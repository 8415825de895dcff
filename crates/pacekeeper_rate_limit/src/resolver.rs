//! Operator-supplied quota overrides.
//!
//! The limiter asks a [`CustomRateLimitResolver`] before falling back to the
//! tier registry. An override, when present, wins unconditionally.

use crate::{OverridesConfig, TeamOverrides};
use pacekeeper_error::PacekeeperResult;
use std::collections::HashMap;

/// Source of per-team and per-channel custom quotas.
///
/// Every method defaults to "no override". Implementations must be safe to
/// call concurrently; the limiter only reads from them.
///
/// # Example
///
/// ```
/// use pacekeeper_error::PacekeeperResult;
/// use pacekeeper_rate_limit::CustomRateLimitResolver;
///
/// struct SlowTeam;
///
/// impl CustomRateLimitResolver for SlowTeam {
///     fn custom_allowed_requests_per_minute(
///         &self,
///         team_id: &str,
///         _method_name: &str,
///     ) -> PacekeeperResult<Option<u32>> {
///         Ok((team_id == "T_SLOW").then_some(5))
///     }
/// }
///
/// assert_eq!(SlowTeam.custom_allowed_requests_per_minute("T_SLOW", "users.list").unwrap(), Some(5));
/// assert_eq!(SlowTeam.custom_allowed_requests_for_chat_post_message_per_minute("T_SLOW", "C1").unwrap(), None);
/// ```
pub trait CustomRateLimitResolver: Send + Sync {
    /// Custom quota for a method throttled per team.
    fn custom_allowed_requests_per_minute(
        &self,
        _team_id: &str,
        _method_name: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok(None)
    }

    /// Custom quota for posting messages to a channel.
    fn custom_allowed_requests_for_chat_post_message_per_minute(
        &self,
        _team_id: &str,
        _channel_id: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok(None)
    }

    /// Custom quota for assistant thread status updates in a channel.
    fn custom_allowed_requests_for_assistant_threads_set_status_per_minute(
        &self,
        _team_id: &str,
        _channel_id: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok(None)
    }
}

/// Resolver that never overrides anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCustomRateLimits;

impl CustomRateLimitResolver for NoCustomRateLimits {}

/// Resolver backed by the `[overrides]` configuration section.
///
/// Team, method and channel ids are matched case-insensitively, since some
/// configuration sources lowercase table keys.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredRateLimits {
    teams: HashMap<String, TeamOverrides>,
}

impl ConfiguredRateLimits {
    /// Build from the overrides section of a configuration.
    pub fn new(overrides: &OverridesConfig) -> Self {
        let teams = overrides
            .teams
            .iter()
            .map(|(team_id, team)| (team_id.to_lowercase(), normalize_team(team)))
            .collect();
        Self { teams }
    }

    fn team(&self, team_id: &str) -> Option<&TeamOverrides> {
        self.teams.get(&team_id.to_lowercase())
    }
}

fn normalize_team(team: &TeamOverrides) -> TeamOverrides {
    let lower = |map: &HashMap<String, u32>| -> HashMap<String, u32> {
        map.iter().map(|(k, v)| (k.to_lowercase(), *v)).collect()
    };
    let mut normalized = team.clone();
    normalized.methods = lower(&team.methods);
    normalized.chat_post_message.channels = lower(&team.chat_post_message.channels);
    normalized.assistant_threads_set_status.channels =
        lower(&team.assistant_threads_set_status.channels);
    normalized
}

impl CustomRateLimitResolver for ConfiguredRateLimits {
    fn custom_allowed_requests_per_minute(
        &self,
        team_id: &str,
        method_name: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok(self
            .team(team_id)
            .and_then(|team| team.methods.get(&method_name.to_lowercase()).copied()))
    }

    fn custom_allowed_requests_for_chat_post_message_per_minute(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok(self.team(team_id).and_then(|team| {
            team.chat_post_message
                .for_channel(&channel_id.to_lowercase())
        }))
    }

    fn custom_allowed_requests_for_assistant_threads_set_status_per_minute(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok(self.team(team_id).and_then(|team| {
            team.assistant_threads_set_status
                .for_channel(&channel_id.to_lowercase())
        }))
    }
}
