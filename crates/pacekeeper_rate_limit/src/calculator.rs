//! Sliding-window wait-time calculation.
//!
//! Given a resolved allowed-requests-per-minute and the calls recorded in
//! the trailing minute, decide how long the caller should wait. The quota is
//! split evenly across every executor sharing the credential.
//!
//! This is advisory pacing: concurrent callers may all observe spare
//! capacity and proceed together. Server-side enforcement stays the backstop.

use crate::{LastMinuteRequests, MetricsDatastore};
use pacekeeper_core::{Clock, Pace, RequestScopeKey, WINDOW_MILLIS, WaitTime};
use pacekeeper_error::PacekeeperResult;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Per-node share of a team-wide quota: floor division, never below one.
///
/// # Examples
///
/// ```
/// use pacekeeper_rate_limit::effective_quota;
///
/// assert_eq!(effective_quota(100, 4), 25);
/// assert_eq!(effective_quota(10, 3), 3);
/// assert_eq!(effective_quota(1, 8), 1);
/// assert_eq!(effective_quota(20, 0), 20);
/// ```
pub fn effective_quota(allowed_per_minute: u32, number_of_nodes: u32) -> u32 {
    (allowed_per_minute / number_of_nodes.max(1)).max(1)
}

/// Turns quota and recent history into an advisory [`WaitTime`].
#[derive(Clone)]
pub struct WaitTimeCalculator {
    metrics_datastore: Arc<dyn MetricsDatastore>,
    clock: Arc<dyn Clock>,
    approaching_ratio: f64,
    fail_open: bool,
}

impl std::fmt::Debug for WaitTimeCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaitTimeCalculator")
            .field("clock", &self.clock)
            .field("approaching_ratio", &self.approaching_ratio)
            .field("fail_open", &self.fail_open)
            .finish_non_exhaustive()
    }
}

impl WaitTimeCalculator {
    /// Create a calculator reading from `metrics_datastore`.
    ///
    /// With `fail_open`, store failures are logged and read as "nothing
    /// recorded" instead of being returned.
    pub fn new(
        metrics_datastore: Arc<dyn MetricsDatastore>,
        clock: Arc<dyn Clock>,
        approaching_ratio: f64,
        fail_open: bool,
    ) -> Self {
        Self {
            metrics_datastore,
            clock,
            approaching_ratio,
            fail_open,
        }
    }

    /// The store this calculator reads from.
    pub fn metrics_datastore(&self) -> &Arc<dyn MetricsDatastore> {
        &self.metrics_datastore
    }

    /// Current instant according to the calculator's clock.
    pub fn now_epoch_millis(&self) -> u64 {
        self.clock.now_epoch_millis()
    }

    /// Cool-down recorded for `key`, if any.
    pub fn rate_limited_method_retry_epoch_millis(
        &self,
        key: &RequestScopeKey,
    ) -> PacekeeperResult<Option<u64>> {
        let result = self
            .metrics_datastore
            .rate_limited_method_retry_epoch_millis(key);
        self.or_fail_open(result, None, "cool-down marker")
    }

    /// Number of executors sharing the credential, at least one.
    pub fn number_of_nodes(&self) -> PacekeeperResult<u32> {
        let result = self.metrics_datastore.number_of_nodes();
        Ok(self.or_fail_open(result, 1, "node count")?.max(1))
    }

    /// Calls recorded against `key` in the trailing minute.
    pub fn last_minute_requests(&self, key: &RequestScopeKey) -> PacekeeperResult<LastMinuteRequests> {
        let result = self.metrics_datastore.last_minute_requests(key);
        self.or_fail_open(result, LastMinuteRequests::empty(), "request window")
    }

    /// Wait time for `key` given the team-wide `allowed_per_minute`.
    #[instrument(skip(self), fields(key = %key))]
    pub fn calculate_wait_time(
        &self,
        key: &RequestScopeKey,
        allowed_per_minute: u32,
    ) -> PacekeeperResult<WaitTime> {
        let nodes = self.number_of_nodes()?;
        let per_node = effective_quota(allowed_per_minute, nodes);
        let window = self.last_minute_requests(key)?;
        let now = self.now_epoch_millis();

        let wait = self.wait_time_for_window(&window, per_node, now);
        debug!(
            allowed_per_minute,
            nodes,
            per_node,
            in_window = window.count_in_window(now),
            approaching = self.is_approaching(&window, per_node, now),
            millis_to_wait = *wait.millis_to_wait(),
            pace = %wait.pace(),
            "Calculated wait time"
        );
        Ok(wait)
    }

    /// Pure decision over an already-fetched window.
    ///
    /// Below the per-node quota the wait is zero and the pace `Normal`. At or
    /// above it, the wait lasts until enough of the oldest calls leave the
    /// one-minute horizon to free a slot.
    pub fn wait_time_for_window(
        &self,
        window: &LastMinuteRequests,
        per_node_quota: u32,
        now_epoch_millis: u64,
    ) -> WaitTime {
        let recent = window.in_window(now_epoch_millis);
        let count = recent.len();
        let quota = per_node_quota.max(1) as usize;

        if count < quota {
            return WaitTime::new(0, Pace::Normal);
        }

        // Freeing one slot needs count - quota + 1 calls to expire; the last
        // of those sits at index count - quota.
        let releasing = recent[count - quota];
        let millis = (releasing + WINDOW_MILLIS).saturating_sub(now_epoch_millis);
        WaitTime::new(millis, Pace::Exceeded)
    }

    /// Whether usage is still below the per-node quota but has reached
    /// `approaching_ratio` of it. Informational only; it never adds a wait.
    pub fn is_approaching(
        &self,
        window: &LastMinuteRequests,
        per_node_quota: u32,
        now_epoch_millis: u64,
    ) -> bool {
        let count = window.count_in_window(now_epoch_millis);
        let quota = per_node_quota.max(1) as usize;
        let threshold = (quota as f64 * self.approaching_ratio).ceil() as usize;
        quota > 1 && count < quota && count >= threshold
    }

    fn or_fail_open<T>(
        &self,
        result: PacekeeperResult<T>,
        fallback: T,
        what: &str,
    ) -> PacekeeperResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if self.fail_open => {
                warn!(error = %e, what, "Metrics store failed, proceeding as if nothing was recorded");
                Ok(fallback)
            }
            Err(e) => Err(e),
        }
    }
}
