//! Read-only views over the tier registry and resolved quotas.

use pacekeeper_error::{PacekeeperResult, ReportError, ReportErrorKind};
use pacekeeper_rate_limit::{RateLimitTier, RateLimiter, TierRegistry, methods};
use serde::Serialize;
use strum::IntoEnumIterator;

/// One tier with its quota and catalogued methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    /// The tier
    pub tier: RateLimitTier,
    /// Allowed requests per minute after configured replacements
    pub allowed_per_minute: u32,
    /// Catalogued methods in the tier, sorted
    pub methods: Vec<&'static str>,
}

/// Every tier of `registry`, in declaration order.
pub fn tier_summaries(registry: &TierRegistry) -> Vec<TierSummary> {
    RateLimitTier::iter()
        .map(|tier| TierSummary {
            tier,
            allowed_per_minute: registry.allowed_requests_per_minute(tier),
            methods: registry.methods_in(tier),
        })
        .collect()
}

/// Quota a limiter would enforce for one team and method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaReport {
    /// Team id
    pub team_id: String,
    /// Method name
    pub method: String,
    /// Channel id, kept only for methods paced per channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Tier the method falls in
    pub tier: RateLimitTier,
    /// Whether the method is in the catalogue
    pub known: bool,
    /// Tier default before overrides
    pub tier_allowed_per_minute: u32,
    /// Quota after custom overrides
    pub allowed_per_minute: u32,
}

/// Resolve the quota `limiter` would apply to `method` for `team_id`.
///
/// # Errors
///
/// Returns a report error if `method` is paced per channel and no
/// `channel_id` was given, or propagates a resolver failure.
pub fn quota_report(
    limiter: &RateLimiter,
    team_id: &str,
    method: &str,
    channel_id: Option<&str>,
) -> PacekeeperResult<QuotaReport> {
    let registry = limiter.registry();
    let tier = registry.lookup_tier(method);
    let channel_id = channel_id.filter(|_| tier.is_special());

    let allowed_per_minute = match (method, channel_id) {
        (methods::CHAT_POST_MESSAGE, Some(channel)) => {
            limiter.allowed_requests_for_chat_post_message_per_minute(team_id, channel)?
        }
        (methods::ASSISTANT_THREADS_SET_STATUS, Some(channel)) => {
            limiter.allowed_requests_for_assistant_threads_set_status_per_minute(team_id, channel)?
        }
        (methods::CHAT_POST_MESSAGE | methods::ASSISTANT_THREADS_SET_STATUS, None) => {
            return Err(ReportError::new(ReportErrorKind::ChannelRequired {
                method: method.to_string(),
            })
            .into());
        }
        _ => limiter.allowed_requests_per_minute(team_id, method)?,
    };

    Ok(QuotaReport {
        team_id: team_id.to_string(),
        method: method.to_string(),
        channel_id: channel_id.map(str::to_string),
        tier,
        known: registry.is_known(method),
        tier_allowed_per_minute: registry.allowed_requests_per_minute(tier),
        allowed_per_minute,
    })
}
