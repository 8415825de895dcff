//! Pacekeeper - client-side request pacing for rate-limited APIs
//!
//! Pacekeeper decides, before every outbound call, how long the caller should
//! wait so that published per-tier quotas are respected, server-reported
//! cool-downs are honored and a team-wide quota is shared evenly by every
//! executor using the same credential.
//!
//! # Quick Start
//!
//! ```
//! use pacekeeper::{InMemoryMetricsDatastore, MetricsRecorder, RateLimiter, RequestScopeKey};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryMetricsDatastore::new());
//! let limiter = RateLimiter::builder()
//!     .executor_name("worker-1")
//!     .metrics_datastore(store.clone())
//!     .build()?;
//!
//! let wait = limiter.acquire_wait_time_for_chat_post_message("T123", "C123")?;
//! if !wait.is_immediate() {
//!     std::thread::sleep(wait.as_duration());
//! }
//!
//! // After the call goes out, the transport layer records it.
//! let key = RequestScopeKey::for_channel("worker-1", "T123", "chat.postMessage", "C123");
//! store.add_request(&key, store.now_epoch_millis())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Pacekeeper is organized as a workspace with focused crates:
//!
//! - `pacekeeper_error` - Error types
//! - `pacekeeper_core` - Wait times, scope keys, clocks and tracing setup
//! - `pacekeeper_rate_limit` - Tiers, overrides, metrics store contracts and the limiter
//!
//! This crate (`pacekeeper`) re-exports everything for convenience and ships
//! the `pacekeeper` command-line tool.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod report;

pub use pacekeeper_core::*;
pub use pacekeeper_error::*;
pub use pacekeeper_rate_limit::*;

pub use report::{QuotaReport, TierSummary, quota_report, tier_summaries};
