//! Wall-clock abstraction.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Source of the current instant in epoch milliseconds.
pub trait Clock: Send + Sync + Debug {
    /// Milliseconds since the Unix epoch.
    fn now_epoch_millis(&self) -> u64;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> u64 {
        // Pre-epoch system clocks read as the epoch.
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Manually driven clock for deterministic tests and simulations.
///
/// # Examples
///
/// ```
/// use pacekeeper_core::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new(1_000);
/// clock.advance(Duration::from_secs(2));
/// assert_eq!(clock.now_epoch_millis(), 3_000);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock frozen at `epoch_millis`.
    pub fn new(epoch_millis: u64) -> Self {
        Self {
            now: AtomicU64::new(epoch_millis),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, epoch_millis: u64) {
        self.now.store(epoch_millis, Ordering::SeqCst);
    }

    /// Move forward by `by`, saturating at `u64::MAX`.
    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(millis))
            });
    }
}

impl Clock for ManualClock {
    fn now_epoch_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
