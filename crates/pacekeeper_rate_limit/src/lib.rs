//! Client-side request pacing for a tiered, per-method rate-limited API.
//!
//! Before each outbound call the [`RateLimiter`] decides how long the caller
//! should wait, so that:
//! - published per-tier quotas are respected
//! - a cool-down reported by an earlier throttling response is honored
//! - one team-wide quota is shared fairly by every executor using the same
//!   credential
//!
//! Request history and cool-down markers live in an external
//! [`MetricsDatastore`]; the limiter only reads them. Custom quotas come from
//! a [`CustomRateLimitResolver`] and always win over tier defaults.
//!
//! ```
//! use pacekeeper_core::RequestScopeKey;
//! use pacekeeper_rate_limit::{InMemoryMetricsDatastore, MetricsRecorder, Pace, RateLimiter, methods};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryMetricsDatastore::new());
//! let limiter = RateLimiter::builder()
//!     .executor_name("worker-1")
//!     .metrics_datastore(store.clone())
//!     .build()?;
//!
//! // The transport layer reports a throttling response...
//! let key = RequestScopeKey::for_method("worker-1", "T1", methods::USERS_LIST);
//! store.record_retry_after(&key, Duration::from_secs(30))?;
//!
//! // ...and the next acquisition honors it.
//! let wait = limiter.acquire_wait_time("T1", methods::USERS_LIST)?;
//! assert_eq!(*wait.pace(), Pace::RateLimited);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod calculator;
mod config;
mod limiter;
mod memory;
mod metrics;
pub mod methods;
mod registry;
mod resolver;
mod tier;

pub use calculator::{WaitTimeCalculator, effective_quota};
pub use config::{
    ChannelOverrides, DEFAULT_APPROACHING_RATIO, DEFAULT_EXECUTOR_NAME, OverridesConfig,
    PacekeeperConfig, PacekeeperConfigBuilder, TeamOverrides,
};
pub use limiter::{RateLimiter, RateLimiterBuilder};
pub use memory::InMemoryMetricsDatastore;
pub use metrics::{LastMinuteRequests, MetricsDatastore, MetricsRecorder};
pub use registry::{DEFAULT_UNKNOWN_METHOD_TIER, TierRegistry};
pub use resolver::{ConfiguredRateLimits, CustomRateLimitResolver, NoCustomRateLimits};
pub use tier::RateLimitTier;

pub use pacekeeper_core::{Pace, RequestScopeKey, WaitTime};
