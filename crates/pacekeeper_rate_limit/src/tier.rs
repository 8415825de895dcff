//! Rate limit tiers published by the remote API.

use serde::{Deserialize, Serialize};

/// Baseline class of methods sharing one default allowed-requests-per-minute.
///
/// Generic tiers apply per team and method. The two special tiers apply per
/// channel and are only ever used by their own method.
///
/// # Examples
///
/// ```
/// use pacekeeper_rate_limit::RateLimitTier;
/// use std::str::FromStr;
///
/// let tier = RateLimitTier::from_str("tier3").unwrap();
/// assert_eq!(tier.default_allowed_requests_per_minute(), 50);
/// assert!(!tier.is_special());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RateLimitTier {
    /// Tier 1: 1+ per minute
    Tier1,
    /// Tier 2: 20+ per minute
    Tier2,
    /// Tier 3: 50+ per minute
    Tier3,
    /// Tier 4: 100+ per minute
    Tier4,
    /// Posting messages: about one per second per channel
    SpecialChatPostMessage,
    /// Assistant thread status updates, per channel
    SpecialAssistantThreadsSetStatus,
}

impl RateLimitTier {
    /// Published allowed requests per minute for this tier.
    pub fn default_allowed_requests_per_minute(&self) -> u32 {
        match self {
            RateLimitTier::Tier1 => 1,
            RateLimitTier::Tier2 => 20,
            RateLimitTier::Tier3 => 50,
            RateLimitTier::Tier4 => 100,
            RateLimitTier::SpecialChatPostMessage => 60,
            RateLimitTier::SpecialAssistantThreadsSetStatus => 600,
        }
    }

    /// Whether the tier is scoped per channel rather than per team.
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            RateLimitTier::SpecialChatPostMessage | RateLimitTier::SpecialAssistantThreadsSetStatus
        )
    }
}
