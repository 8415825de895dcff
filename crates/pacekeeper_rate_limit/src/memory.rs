//! In-process metrics store.

use crate::{LastMinuteRequests, MetricsDatastore, MetricsRecorder};
use pacekeeper_core::{Clock, RequestScopeKey, SystemClock, WINDOW_MILLIS};
use pacekeeper_error::{PacekeeperResult, StoreError, StoreErrorKind};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, instrument};

/// Metrics store kept in process memory.
///
/// Suitable for a single executor, tests and simulations. Deployments with
/// several executors sharing a credential need a store visible to all of
/// them; the node count here is whatever the owner reports.
///
/// # Example
///
/// ```
/// use pacekeeper_core::RequestScopeKey;
/// use pacekeeper_rate_limit::{InMemoryMetricsDatastore, MetricsDatastore, MetricsRecorder};
///
/// let store = InMemoryMetricsDatastore::new();
/// let key = RequestScopeKey::for_method("worker-1", "T1", "users.list");
/// store.add_request(&key, store.now_epoch_millis()).unwrap();
/// assert_eq!(store.last_minute_requests(&key).unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryMetricsDatastore {
    clock: Arc<dyn Clock>,
    number_of_nodes: AtomicU32,
    requests: RwLock<HashMap<RequestScopeKey, VecDeque<u64>>>,
    rate_limited: RwLock<HashMap<RequestScopeKey, u64>>,
}

impl InMemoryMetricsDatastore {
    /// Store on the system clock with a single node.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store reading "now" from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            number_of_nodes: AtomicU32::new(1),
            requests: RwLock::new(HashMap::new()),
            rate_limited: RwLock::new(HashMap::new()),
        }
    }

    /// Current instant according to the store's clock.
    pub fn now_epoch_millis(&self) -> u64 {
        self.clock.now_epoch_millis()
    }

    /// Report how many executors share the credential.
    ///
    /// # Errors
    ///
    /// Returns a store error if `nodes` is zero.
    #[instrument(skip(self))]
    pub fn set_number_of_nodes(&self, nodes: u32) -> PacekeeperResult<()> {
        if nodes == 0 {
            return Err(StoreError::new(StoreErrorKind::InvalidNodeCount(nodes)).into());
        }
        self.number_of_nodes.store(nodes, Ordering::SeqCst);
        debug!(nodes, "Updated number of nodes");
        Ok(())
    }

    /// Record a throttling response that asked to retry after `retry_after`.
    pub fn record_retry_after(
        &self,
        key: &RequestScopeKey,
        retry_after: std::time::Duration,
    ) -> PacekeeperResult<()> {
        let retry_after = u64::try_from(retry_after.as_millis()).unwrap_or(u64::MAX);
        let until = self.now_epoch_millis().saturating_add(retry_after);
        self.set_rate_limited_method_retry_epoch_millis(key, until)
    }
}

impl Default for InMemoryMetricsDatastore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(what: &str) -> StoreError {
    StoreError::new(StoreErrorKind::LockPoisoned(what.to_string()))
}

impl MetricsDatastore for InMemoryMetricsDatastore {
    fn rate_limited_method_retry_epoch_millis(
        &self,
        key: &RequestScopeKey,
    ) -> PacekeeperResult<Option<u64>> {
        let rate_limited = self
            .rate_limited
            .read()
            .map_err(|_| poisoned("rate_limited"))?;
        let now = self.now_epoch_millis();
        // Expired markers are no longer in force.
        Ok(rate_limited.get(key).copied().filter(|until| *until > now))
    }

    fn number_of_nodes(&self) -> PacekeeperResult<u32> {
        Ok(self.number_of_nodes.load(Ordering::SeqCst))
    }

    fn last_minute_requests(&self, key: &RequestScopeKey) -> PacekeeperResult<LastMinuteRequests> {
        let requests = self.requests.read().map_err(|_| poisoned("requests"))?;
        Ok(requests
            .get(key)
            .map(|timestamps| LastMinuteRequests::from_timestamps(timestamps.iter().copied()))
            .unwrap_or_default())
    }
}

impl MetricsRecorder for InMemoryMetricsDatastore {
    fn add_request(&self, key: &RequestScopeKey, epoch_millis: u64) -> PacekeeperResult<()> {
        let horizon = self.now_epoch_millis().saturating_sub(WINDOW_MILLIS);
        let mut requests = self.requests.write().map_err(|_| poisoned("requests"))?;
        let timestamps = requests.entry(key.clone()).or_default();

        let position = timestamps.partition_point(|ts| *ts <= epoch_millis);
        timestamps.insert(position, epoch_millis);
        while timestamps.front().is_some_and(|ts| *ts <= horizon) {
            timestamps.pop_front();
        }
        Ok(())
    }

    fn set_rate_limited_method_retry_epoch_millis(
        &self,
        key: &RequestScopeKey,
        epoch_millis: u64,
    ) -> PacekeeperResult<()> {
        let mut rate_limited = self
            .rate_limited
            .write()
            .map_err(|_| poisoned("rate_limited"))?;
        debug!(%key, epoch_millis, "Recorded cool-down");
        rate_limited.insert(key.clone(), epoch_millis);
        Ok(())
    }

    fn clear_rate_limited(&self, key: &RequestScopeKey) -> PacekeeperResult<()> {
        let mut rate_limited = self
            .rate_limited
            .write()
            .map_err(|_| poisoned("rate_limited"))?;
        rate_limited.remove(key);
        Ok(())
    }
}
