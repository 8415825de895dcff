//! Tests for tier summaries and quota reports.

use pacekeeper::{
    InMemoryMetricsDatastore, OverridesConfig, PacekeeperConfig, PacekeeperErrorKind,
    RateLimitTier, RateLimiter, ReportErrorKind, TeamOverrides, TierRegistry, methods,
    quota_report, tier_summaries,
};
use std::collections::HashMap;
use std::sync::Arc;

fn limiter_with_overrides() -> RateLimiter {
    let mut team = TeamOverrides::default();
    team.methods.insert(methods::USERS_INFO.to_string(), 10);
    team.chat_post_message.default = Some(30);
    team.chat_post_message.channels.insert("C_SLOW".to_string(), 5);

    let config = PacekeeperConfig::builder()
        .overrides(OverridesConfig {
            teams: HashMap::from([("T1".to_string(), team)]),
        })
        .build()
        .unwrap();
    RateLimiter::from_config(&config, Arc::new(InMemoryMetricsDatastore::new())).unwrap()
}

#[test]
fn test_tier_summaries_cover_every_tier() {
    let summaries = tier_summaries(&TierRegistry::new());
    assert_eq!(summaries.len(), 6);
    assert_eq!(summaries[0].tier, RateLimitTier::Tier1);
    assert_eq!(summaries[0].allowed_per_minute, 1);

    let post = summaries
        .iter()
        .find(|s| s.tier == RateLimitTier::SpecialChatPostMessage)
        .unwrap();
    assert_eq!(post.methods, vec![methods::CHAT_POST_MESSAGE]);
}

#[test]
fn test_tier_summaries_follow_replaced_quotas() {
    let registry =
        TierRegistry::with_overrides(&HashMap::from([(RateLimitTier::Tier3, 40)]), RateLimitTier::Tier2)
            .unwrap();
    let tier3 = tier_summaries(&registry)
        .into_iter()
        .find(|s| s.tier == RateLimitTier::Tier3)
        .unwrap();
    assert_eq!(tier3.allowed_per_minute, 40);
    assert!(tier3.methods.contains(&methods::CONVERSATIONS_HISTORY));
}

#[test]
fn test_quota_report_applies_method_override() {
    let report = quota_report(&limiter_with_overrides(), "T1", methods::USERS_INFO, None).unwrap();
    assert_eq!(report.tier, RateLimitTier::Tier4);
    assert!(report.known);
    assert_eq!(report.tier_allowed_per_minute, 100);
    assert_eq!(report.allowed_per_minute, 10);
}

#[test]
fn test_quota_report_for_channels() {
    let limiter = limiter_with_overrides();

    let slow = quota_report(&limiter, "T1", methods::CHAT_POST_MESSAGE, Some("C_SLOW")).unwrap();
    assert_eq!(slow.allowed_per_minute, 5);
    assert_eq!(slow.channel_id.as_deref(), Some("C_SLOW"));

    let other = quota_report(&limiter, "T1", methods::CHAT_POST_MESSAGE, Some("C_OTHER")).unwrap();
    assert_eq!(other.allowed_per_minute, 30);

    let status = quota_report(
        &limiter,
        "T1",
        methods::ASSISTANT_THREADS_SET_STATUS,
        Some("C_SLOW"),
    )
    .unwrap();
    assert_eq!(status.allowed_per_minute, 600);
}

#[test]
fn test_quota_report_requires_channel_for_channel_methods() {
    let err = quota_report(&limiter_with_overrides(), "T1", methods::CHAT_POST_MESSAGE, None)
        .unwrap_err();
    match err.kind() {
        PacekeeperErrorKind::Report(e) => assert_eq!(
            e.kind,
            ReportErrorKind::ChannelRequired {
                method: methods::CHAT_POST_MESSAGE.to_string()
            }
        ),
        other => panic!("Expected report error, got {}", other),
    }
}

#[test]
fn test_quota_report_drops_channel_for_team_methods() {
    let report =
        quota_report(&limiter_with_overrides(), "T2", methods::USERS_LIST, Some("C1")).unwrap();
    assert_eq!(report.channel_id, None);
    assert_eq!(report.allowed_per_minute, 20);
}

#[test]
fn test_quota_report_for_unknown_method() {
    let report = quota_report(&limiter_with_overrides(), "T1", "brand.newMethod", None).unwrap();
    assert!(!report.known);
    assert_eq!(report.tier, RateLimitTier::Tier2);
    assert_eq!(report.allowed_per_minute, 20);
}

#[test]
fn test_quota_report_serializes() {
    let report = quota_report(&limiter_with_overrides(), "T1", methods::USERS_INFO, None).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tier"], "tier4");
    assert_eq!(json["allowed_per_minute"], 10);
    assert!(json.get("channel_id").is_none());
}
