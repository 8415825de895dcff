//! Immutable method-to-tier registry.

use crate::RateLimitTier;
use crate::methods::{ASSISTANT_THREADS_SET_STATUS, CHAT_POST_MESSAGE, METHOD_TIERS};
use pacekeeper_error::{ConfigError, PacekeeperResult};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Tier used for methods missing from the catalogue unless configured otherwise.
pub const DEFAULT_UNKNOWN_METHOD_TIER: RateLimitTier = RateLimitTier::Tier2;

/// Mapping from method identifier to tier, plus allowed requests per minute
/// for each tier.
///
/// Built once at startup and never mutated. Tier quotas may be adjusted at
/// construction time (see [`TierRegistry::with_overrides`]); afterwards the
/// registry is read-only and cheap to share.
///
/// # Examples
///
/// ```
/// use pacekeeper_rate_limit::{RateLimitTier, TierRegistry, methods};
///
/// let registry = TierRegistry::new();
/// assert_eq!(registry.lookup_tier(methods::CONVERSATIONS_HISTORY), RateLimitTier::Tier3);
/// assert_eq!(registry.allowed_requests_per_minute_for_method(methods::USERS_INFO), 100);
/// ```
#[derive(Debug, Clone)]
pub struct TierRegistry {
    method_tiers: HashMap<&'static str, RateLimitTier>,
    allowed_per_minute: HashMap<RateLimitTier, u32>,
    default_tier: RateLimitTier,
}

impl TierRegistry {
    /// Registry with the published tier quotas.
    pub fn new() -> Self {
        Self {
            method_tiers: METHOD_TIERS.iter().copied().collect(),
            allowed_per_minute: RateLimitTier::iter()
                .map(|tier| (tier, tier.default_allowed_requests_per_minute()))
                .collect(),
            default_tier: DEFAULT_UNKNOWN_METHOD_TIER,
        }
    }

    /// Registry with some tier quotas replaced and a chosen tier for
    /// methods missing from the catalogue.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any quota is zero or the default
    /// tier is one of the per-channel special tiers.
    #[instrument(skip(tier_overrides), fields(overrides = tier_overrides.len()))]
    pub fn with_overrides(
        tier_overrides: &HashMap<RateLimitTier, u32>,
        default_tier: RateLimitTier,
    ) -> PacekeeperResult<Self> {
        if default_tier.is_special() {
            return Err(ConfigError::new(format!(
                "default_tier must be a generic tier, got {}",
                default_tier
            ))
            .into());
        }

        let mut registry = Self::new();
        registry.default_tier = default_tier;

        for (tier, allowed) in tier_overrides {
            if *allowed == 0 {
                return Err(ConfigError::new(format!(
                    "allowed requests per minute for {} must be positive",
                    tier
                ))
                .into());
            }
            debug!(%tier, allowed, "Overriding tier quota");
            registry.allowed_per_minute.insert(*tier, *allowed);
        }

        Ok(registry)
    }

    /// Tier of a method.
    ///
    /// The two per-channel methods always resolve to their special tier.
    /// Methods missing from the catalogue resolve to the default tier.
    pub fn lookup_tier(&self, method_name: &str) -> RateLimitTier {
        match method_name {
            CHAT_POST_MESSAGE => RateLimitTier::SpecialChatPostMessage,
            ASSISTANT_THREADS_SET_STATUS => RateLimitTier::SpecialAssistantThreadsSetStatus,
            _ => match self.method_tiers.get(method_name) {
                Some(tier) => *tier,
                None => {
                    debug!(method_name, tier = %self.default_tier, "Unknown method, using default tier");
                    self.default_tier
                }
            },
        }
    }

    /// Whether the method is in the catalogue.
    pub fn is_known(&self, method_name: &str) -> bool {
        self.method_tiers.contains_key(method_name)
    }

    /// Allowed requests per minute for a tier.
    pub fn allowed_requests_per_minute(&self, tier: RateLimitTier) -> u32 {
        self.allowed_per_minute
            .get(&tier)
            .copied()
            .unwrap_or_else(|| tier.default_allowed_requests_per_minute())
    }

    /// Allowed requests per minute for the tier of a method.
    pub fn allowed_requests_per_minute_for_method(&self, method_name: &str) -> u32 {
        self.allowed_requests_per_minute(self.lookup_tier(method_name))
    }

    /// Tier used for methods missing from the catalogue.
    pub fn default_tier(&self) -> RateLimitTier {
        self.default_tier
    }

    /// Catalogued methods belonging to a tier, sorted by name.
    pub fn methods_in(&self, tier: RateLimitTier) -> Vec<&'static str> {
        let mut methods: Vec<_> = self
            .method_tiers
            .iter()
            .filter(|(_, t)| **t == tier)
            .map(|(method, _)| *method)
            .collect();
        methods.sort_unstable();
        methods
    }
}

impl Default for TierRegistry {
    fn default() -> Self {
        Self::new()
    }
}
