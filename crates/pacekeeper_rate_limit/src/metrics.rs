//! Contracts for the store holding request history and cool-down markers.
//!
//! The limiter only ever reads through [`MetricsDatastore`]. Transport code
//! that performs the actual calls writes through [`MetricsRecorder`], using
//! the same [`RequestScopeKey`] construction as the limiter.

use pacekeeper_core::{RequestScopeKey, WINDOW_MILLIS};
use pacekeeper_error::PacekeeperResult;

/// Read side of the metrics store.
///
/// Implementations must tolerate unsynchronized concurrent calls. "Absent"
/// is `Ok(None)` or an empty window; `Err` means the store itself failed.
pub trait MetricsDatastore: Send + Sync {
    /// Epoch millisecond before which `key` must not be called again, if a
    /// throttling response was recorded for it.
    fn rate_limited_method_retry_epoch_millis(
        &self,
        key: &RequestScopeKey,
    ) -> PacekeeperResult<Option<u64>>;

    /// Number of processes currently sharing the credential.
    fn number_of_nodes(&self) -> PacekeeperResult<u32>;

    /// Calls recorded against `key` in the trailing minute.
    fn last_minute_requests(&self, key: &RequestScopeKey) -> PacekeeperResult<LastMinuteRequests>;
}

/// Write side of the metrics store, used by the transport layer.
pub trait MetricsRecorder: MetricsDatastore {
    /// Record a call issued against `key` at `epoch_millis`.
    fn add_request(&self, key: &RequestScopeKey, epoch_millis: u64) -> PacekeeperResult<()>;

    /// Record a server-reported cool-down for `key`.
    fn set_rate_limited_method_retry_epoch_millis(
        &self,
        key: &RequestScopeKey,
        epoch_millis: u64,
    ) -> PacekeeperResult<()>;

    /// Drop any cool-down recorded for `key`.
    fn clear_rate_limited(&self, key: &RequestScopeKey) -> PacekeeperResult<()>;
}

/// Timestamps of recent calls against one key, oldest first.
///
/// # Examples
///
/// ```
/// use pacekeeper_rate_limit::LastMinuteRequests;
///
/// let window = LastMinuteRequests::from_timestamps([70_000, 5_000, 30_000]);
/// assert_eq!(window.oldest(), Some(5_000));
/// // At t=70s only the calls after t=10s are still inside the minute.
/// assert_eq!(window.in_window(70_000), &[30_000, 70_000]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastMinuteRequests {
    timestamps: Vec<u64>,
}

impl LastMinuteRequests {
    /// Build from epoch-millisecond timestamps in any order.
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = u64>) -> Self {
        let mut timestamps: Vec<u64> = timestamps.into_iter().collect();
        timestamps.sort_unstable();
        Self { timestamps }
    }

    /// Empty window.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of timestamps held, regardless of age.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when no timestamps are held.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Oldest timestamp held.
    pub fn oldest(&self) -> Option<u64> {
        self.timestamps.first().copied()
    }

    /// Timestamps newer than one minute before `now_epoch_millis`, oldest first.
    ///
    /// Timestamps ahead of `now` (clock skew between nodes) are kept.
    pub fn in_window(&self, now_epoch_millis: u64) -> &[u64] {
        let horizon = now_epoch_millis.saturating_sub(WINDOW_MILLIS);
        let start = self.timestamps.partition_point(|ts| *ts <= horizon);
        &self.timestamps[start..]
    }

    /// Number of timestamps newer than one minute before `now_epoch_millis`.
    pub fn count_in_window(&self, now_epoch_millis: u64) -> usize {
        self.in_window(now_epoch_millis).len()
    }
}
