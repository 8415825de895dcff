//! Tests for the rate limiter orchestration.

use pacekeeper_core::{Clock, ManualClock, Pace, RequestScopeKey, WaitTime};
use pacekeeper_error::{
    PacekeeperErrorKind, PacekeeperResult, ResolverError, StoreError, StoreErrorKind,
};
use pacekeeper_rate_limit::{
    CustomRateLimitResolver, InMemoryMetricsDatastore, LastMinuteRequests, MetricsDatastore,
    MetricsRecorder, PacekeeperConfig, RateLimiter, methods,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const NOW: u64 = 1_700_000_000_000;
const EXECUTOR: &str = "worker-1";

struct Fixture {
    clock: Arc<ManualClock>,
    store: Arc<InMemoryMetricsDatastore>,
    limiter: RateLimiter,
}

fn fixture_with_resolver(resolver: Option<Arc<dyn CustomRateLimitResolver>>) -> Fixture {
    let clock = Arc::new(ManualClock::new(NOW));
    let store = Arc::new(InMemoryMetricsDatastore::with_clock(clock.clone()));
    let mut builder = RateLimiter::builder()
        .executor_name(EXECUTOR)
        .metrics_datastore(store.clone())
        .clock(clock.clone());
    if let Some(resolver) = resolver {
        builder = builder.resolver(resolver);
    }
    Fixture {
        clock,
        store,
        limiter: builder.build().unwrap(),
    }
}

fn fixture() -> Fixture {
    fixture_with_resolver(None)
}

/// `count` calls spread 900ms apart, all inside the trailing minute for up
/// to 66 calls.
fn record_calls(store: &InMemoryMetricsDatastore, key: &RequestScopeKey, count: u64) {
    for i in 1..=count {
        store.add_request(key, NOW - i * 900).unwrap();
    }
}

/// Resolver with a fixed override for one team.
struct FixedOverride {
    team_id: &'static str,
    allowed: u32,
}

impl CustomRateLimitResolver for FixedOverride {
    fn custom_allowed_requests_per_minute(
        &self,
        team_id: &str,
        _method_name: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok((team_id == self.team_id).then_some(self.allowed))
    }

    fn custom_allowed_requests_for_chat_post_message_per_minute(
        &self,
        team_id: &str,
        _channel_id: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Ok((team_id == self.team_id).then_some(self.allowed))
    }
}

/// Store that remembers which keys it was asked about.
#[derive(Default)]
struct RecordingStore {
    cool_down_keys: Mutex<Vec<String>>,
    window_keys: Mutex<Vec<String>>,
}

impl MetricsDatastore for RecordingStore {
    fn rate_limited_method_retry_epoch_millis(
        &self,
        key: &RequestScopeKey,
    ) -> PacekeeperResult<Option<u64>> {
        self.cool_down_keys.lock().unwrap().push(key.method_key().clone());
        Ok(None)
    }

    fn number_of_nodes(&self) -> PacekeeperResult<u32> {
        Ok(1)
    }

    fn last_minute_requests(&self, key: &RequestScopeKey) -> PacekeeperResult<LastMinuteRequests> {
        self.window_keys.lock().unwrap().push(key.method_key().clone());
        Ok(LastMinuteRequests::empty())
    }
}

/// Store whose backend is down.
struct UnavailableStore;

impl MetricsDatastore for UnavailableStore {
    fn rate_limited_method_retry_epoch_millis(
        &self,
        _key: &RequestScopeKey,
    ) -> PacekeeperResult<Option<u64>> {
        Err(StoreError::new(StoreErrorKind::Unavailable("connection refused".into())).into())
    }

    fn number_of_nodes(&self) -> PacekeeperResult<u32> {
        Err(StoreError::new(StoreErrorKind::Unavailable("connection refused".into())).into())
    }

    fn last_minute_requests(&self, _key: &RequestScopeKey) -> PacekeeperResult<LastMinuteRequests> {
        Err(StoreError::new(StoreErrorKind::Unavailable("connection refused".into())).into())
    }
}

/// Resolver whose backing service is down.
struct FailingResolver;

impl CustomRateLimitResolver for FailingResolver {
    fn custom_allowed_requests_per_minute(
        &self,
        _team_id: &str,
        _method_name: &str,
    ) -> PacekeeperResult<Option<u32>> {
        Err(ResolverError::new("override service timed out").into())
    }
}

/// Store that keeps returning a cool-down that has already passed.
struct StaleCoolDownStore {
    until: u64,
}

impl MetricsDatastore for StaleCoolDownStore {
    fn rate_limited_method_retry_epoch_millis(
        &self,
        _key: &RequestScopeKey,
    ) -> PacekeeperResult<Option<u64>> {
        Ok(Some(self.until))
    }

    fn number_of_nodes(&self) -> PacekeeperResult<u32> {
        Ok(1)
    }

    fn last_minute_requests(&self, _key: &RequestScopeKey) -> PacekeeperResult<LastMinuteRequests> {
        Ok(LastMinuteRequests::empty())
    }
}

#[test]
fn test_no_override_no_cool_down_below_quota_is_immediate() {
    let f = fixture();
    let key = RequestScopeKey::for_method(EXECUTOR, "T1", methods::CONVERSATIONS_HISTORY);
    record_calls(&f.store, &key, 3);

    let wait = f
        .limiter
        .acquire_wait_time("T1", methods::CONVERSATIONS_HISTORY)
        .unwrap();
    assert_eq!(wait, WaitTime::new(0, Pace::Normal));
}

#[test]
fn test_cool_down_wins_over_window() {
    let f = fixture();
    let key = RequestScopeKey::for_method(EXECUTOR, "T1", methods::USERS_LIST);
    f.store
        .set_rate_limited_method_retry_epoch_millis(&key, NOW + 5_000)
        .unwrap();

    let wait = f.limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap();
    assert_eq!(*wait.pace(), Pace::RateLimited);
    assert_eq!(*wait.millis_to_wait(), 5_000);

    // Still rate limited with a full window: the cool-down is authoritative.
    record_calls(&f.store, &key, 50);
    let wait = f.limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap();
    assert_eq!(*wait.pace(), Pace::RateLimited);
    assert_eq!(*wait.millis_to_wait(), 5_000);
}

#[test]
fn test_cool_down_counts_down_with_the_clock() {
    let f = fixture();
    let key = RequestScopeKey::for_method(EXECUTOR, "T1", methods::USERS_LIST);
    f.store.record_retry_after(&key, Duration::from_secs(5)).unwrap();

    f.clock.advance(Duration::from_millis(1_500));
    let wait = f.limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap();
    assert_eq!(*wait.millis_to_wait(), 3_500);

    f.clock.advance(Duration::from_secs(5));
    let wait = f.limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap();
    assert_eq!(wait, WaitTime::new(0, Pace::Normal));
}

#[test]
fn test_expired_cool_down_from_store_is_clamped_to_zero() {
    let clock = Arc::new(ManualClock::new(NOW));
    let limiter = RateLimiter::builder()
        .metrics_datastore(Arc::new(StaleCoolDownStore { until: NOW - 2_000 }))
        .clock(clock)
        .build()
        .unwrap();

    let wait = limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap();
    assert_eq!(*wait.millis_to_wait(), 0);
    assert_eq!(*wait.pace(), Pace::RateLimited);
}

#[test]
fn test_quota_split_across_nodes() {
    let f = fixture();
    f.store.set_number_of_nodes(4).unwrap();
    // users.info is tier 4: 100 per minute, 25 per node.
    let key = RequestScopeKey::for_method(EXECUTOR, "T1", methods::USERS_INFO);

    record_calls(&f.store, &key, 24);
    let wait = f.limiter.acquire_wait_time("T1", methods::USERS_INFO).unwrap();
    assert_eq!(wait, WaitTime::new(0, Pace::Normal));

    f.store.add_request(&key, NOW - 30_000).unwrap();
    let wait = f.limiter.acquire_wait_time("T1", methods::USERS_INFO).unwrap();
    assert_ne!(*wait.pace(), Pace::Normal);
    assert!(*wait.millis_to_wait() > 0);
}

#[test]
fn test_custom_override_replaces_tier_default() {
    let f = fixture_with_resolver(Some(Arc::new(FixedOverride {
        team_id: "T1",
        allowed: 10,
    })));

    assert_eq!(
        f.limiter
            .allowed_requests_per_minute("T1", methods::USERS_INFO)
            .unwrap(),
        10
    );
    assert_eq!(
        f.limiter
            .allowed_requests_per_minute("T2", methods::USERS_INFO)
            .unwrap(),
        100
    );

    // Ten calls exhaust the override even though the tier allows 100.
    let key = RequestScopeKey::for_method(EXECUTOR, "T1", methods::USERS_INFO);
    record_calls(&f.store, &key, 10);
    let wait = f.limiter.acquire_wait_time("T1", methods::USERS_INFO).unwrap();
    assert_eq!(*wait.pace(), Pace::Exceeded);
}

#[test]
fn test_special_quotas_use_special_tiers() {
    let f = fixture_with_resolver(Some(Arc::new(FixedOverride {
        team_id: "T1",
        allowed: 7,
    })));

    assert_eq!(
        f.limiter
            .allowed_requests_for_chat_post_message_per_minute("T1", "C1")
            .unwrap(),
        7
    );
    assert_eq!(
        f.limiter
            .allowed_requests_for_chat_post_message_per_minute("T2", "C1")
            .unwrap(),
        60
    );
    // FixedOverride leaves assistant status alone.
    assert_eq!(
        f.limiter
            .allowed_requests_for_assistant_threads_set_status_per_minute("T1", "C1")
            .unwrap(),
        600
    );
}

#[test]
fn test_post_message_consults_store_with_channel_scoped_key() {
    let store = Arc::new(RecordingStore::default());
    let limiter = RateLimiter::builder()
        .metrics_datastore(store.clone())
        .build()
        .unwrap();

    limiter
        .acquire_wait_time_for_chat_post_message("T1", "C123")
        .unwrap();
    limiter
        .acquire_wait_time_for_assistant_threads_set_status("T1", "C123")
        .unwrap();

    let expected = vec![
        "chat.postMessage_C123".to_string(),
        "assistant.threads.setStatus_C123".to_string(),
    ];
    assert_eq!(*store.cool_down_keys.lock().unwrap(), expected);
    assert_eq!(*store.window_keys.lock().unwrap(), expected);
}

#[test]
fn test_post_message_is_tracked_per_channel() {
    let f = fixture();
    let busy = RequestScopeKey::for_channel(EXECUTOR, "T1", methods::CHAT_POST_MESSAGE, "C_BUSY");
    record_calls(&f.store, &busy, 60);
    assert_eq!(f.store.last_minute_requests(&busy).unwrap().count_in_window(NOW), 60);

    let wait = f
        .limiter
        .acquire_wait_time_for_chat_post_message("T1", "C_BUSY")
        .unwrap();
    assert!(wait.pace().should_back_off());

    let wait = f
        .limiter
        .acquire_wait_time_for_chat_post_message("T1", "C_QUIET")
        .unwrap();
    assert!(wait.is_immediate());

    // The generic path for the same method name does not see channel history.
    let wait = f
        .limiter
        .acquire_wait_time("T1", methods::CHAT_POST_MESSAGE)
        .unwrap();
    assert!(wait.is_immediate());
}

#[test]
fn test_assistant_status_cool_down_is_per_channel() {
    let f = fixture();
    let key = RequestScopeKey::for_channel(
        EXECUTOR,
        "T1",
        methods::ASSISTANT_THREADS_SET_STATUS,
        "C1",
    );
    f.store
        .set_rate_limited_method_retry_epoch_millis(&key, NOW + 1_000)
        .unwrap();

    let limited = f
        .limiter
        .acquire_wait_time_for_assistant_threads_set_status("T1", "C1")
        .unwrap();
    assert_eq!(limited, WaitTime::new(1_000, Pace::RateLimited));

    let other = f
        .limiter
        .acquire_wait_time_for_assistant_threads_set_status("T1", "C2")
        .unwrap();
    assert_eq!(*other.pace(), Pace::Normal);
}

#[test]
fn test_repeated_acquisition_is_idempotent() {
    let f = fixture();
    let key = RequestScopeKey::for_method(EXECUTOR, "T1", methods::REACTIONS_ADD);
    record_calls(&f.store, &key, 50);

    let first = f.limiter.acquire_wait_time("T1", methods::REACTIONS_ADD).unwrap();
    for _ in 0..10 {
        let again = f.limiter.acquire_wait_time("T1", methods::REACTIONS_ADD).unwrap();
        assert_eq!(again, first);
    }
    assert_eq!(f.store.last_minute_requests(&key).unwrap().len(), 50);
}

#[test]
fn test_store_failure_propagates_by_default() {
    let limiter = RateLimiter::builder()
        .metrics_datastore(Arc::new(UnavailableStore))
        .build()
        .unwrap();

    let err = limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap_err();
    assert!(matches!(err.kind(), PacekeeperErrorKind::Store(_)));
}

#[test]
fn test_store_failure_is_swallowed_when_fail_open() {
    let limiter = RateLimiter::builder()
        .metrics_datastore(Arc::new(UnavailableStore))
        .fail_open(true)
        .build()
        .unwrap();

    let wait = limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap();
    assert_eq!(wait, WaitTime::immediate());
}

#[test]
fn test_resolver_failure_propagates_by_default() {
    let f = fixture_with_resolver(Some(Arc::new(FailingResolver)));
    let err = f.limiter.acquire_wait_time("T1", methods::USERS_LIST).unwrap_err();
    assert!(matches!(err.kind(), PacekeeperErrorKind::Resolver(_)));

    // Resolver methods left at their default still work.
    assert!(f.limiter.acquire_wait_time_for_chat_post_message("T1", "C1").is_ok());
}

#[test]
fn test_resolver_failure_falls_back_to_tier_when_fail_open() {
    let limiter = RateLimiter::builder()
        .metrics_datastore(Arc::new(InMemoryMetricsDatastore::new()))
        .resolver(Arc::new(FailingResolver))
        .fail_open(true)
        .build()
        .unwrap();

    assert_eq!(
        limiter
            .allowed_requests_per_minute("T1", methods::USERS_LIST)
            .unwrap(),
        20
    );
    assert!(limiter.acquire_wait_time("T1", methods::USERS_LIST).is_ok());
}

#[test]
fn test_builder_requires_metrics_datastore() {
    let err = RateLimiter::builder().build().unwrap_err();
    assert!(matches!(err.kind(), PacekeeperErrorKind::Builder(_)));
}

#[test]
fn test_builder_rejects_empty_executor_name() {
    let result = RateLimiter::builder()
        .executor_name("")
        .metrics_datastore(Arc::new(InMemoryMetricsDatastore::new()))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_builder_rejects_out_of_range_ratio() {
    for ratio in [0.0, 1.5, f64::NAN] {
        let result = RateLimiter::builder()
            .approaching_ratio(ratio)
            .metrics_datastore(Arc::new(InMemoryMetricsDatastore::new()))
            .build();
        assert!(result.is_err(), "ratio {} should be rejected", ratio);
    }
}

#[test]
fn test_from_config_uses_configured_overrides() {
    let mut team = pacekeeper_rate_limit::TeamOverrides::default();
    team.chat_post_message.channels.insert("C9".to_string(), 2);
    let overrides = pacekeeper_rate_limit::OverridesConfig {
        teams: [("T9".to_string(), team)].into_iter().collect(),
    };
    let config = PacekeeperConfig::builder()
        .executor_name("from-config")
        .overrides(overrides)
        .build()
        .unwrap();

    let limiter =
        RateLimiter::from_config(&config, Arc::new(InMemoryMetricsDatastore::new())).unwrap();
    assert_eq!(limiter.executor_name(), "from-config");
    assert_eq!(
        limiter
            .allowed_requests_for_chat_post_message_per_minute("T9", "C9")
            .unwrap(),
        2
    );
}

#[test]
fn test_concurrent_callers_share_one_limiter() {
    let f = fixture();
    let key = RequestScopeKey::for_method(EXECUTOR, "T1", methods::FILES_LIST);
    record_calls(&f.store, &key, 10);
    let expected = f.limiter.acquire_wait_time("T1", methods::FILES_LIST).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = f.limiter.clone();
            std::thread::spawn(move || limiter.acquire_wait_time("T1", methods::FILES_LIST))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), expected);
    }
    assert_eq!(f.clock.now_epoch_millis(), NOW);
}
