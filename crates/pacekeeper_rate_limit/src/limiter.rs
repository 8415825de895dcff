//! Rate limiter deciding how long to wait before each outbound call.
//!
//! Every acquisition follows the same protocol:
//! 1. Build the [`RequestScopeKey`] (the channel is folded into the method
//!    key for the two per-channel methods)
//! 2. If the metrics store holds a cool-down for that key, return it with
//!    [`Pace::RateLimited`]; a server-reported cool-down is never computed away
//! 3. Otherwise resolve the allowed requests per minute (custom override
//!    first, tier default second) and hand it to the [`WaitTimeCalculator`]
//!
//! The limiter never sleeps, never writes to the store and holds no mutable
//! state of its own. Callers decide how to wait.

use crate::methods::{ASSISTANT_THREADS_SET_STATUS, CHAT_POST_MESSAGE};
use crate::{
    ConfiguredRateLimits, CustomRateLimitResolver, MetricsDatastore, NoCustomRateLimits,
    PacekeeperConfig, RateLimitTier, TierRegistry, WaitTimeCalculator,
    config::{DEFAULT_APPROACHING_RATIO, DEFAULT_EXECUTOR_NAME},
};
use pacekeeper_core::{Clock, Pace, RequestScopeKey, SystemClock, WaitTime};
use pacekeeper_error::{BuilderError, BuilderErrorKind, PacekeeperResult};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Advisory request pacer for one executor.
///
/// Cheap to clone; clones share the same store, resolver and registry.
///
/// # Example
///
/// ```
/// use pacekeeper_rate_limit::{InMemoryMetricsDatastore, RateLimiter, methods};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(InMemoryMetricsDatastore::new());
/// let limiter = RateLimiter::builder()
///     .executor_name("worker-1")
///     .metrics_datastore(store)
///     .build()?;
///
/// let wait = limiter.acquire_wait_time("T123", methods::CONVERSATIONS_HISTORY)?;
/// assert!(wait.is_immediate());
///
/// let wait = limiter.acquire_wait_time_for_chat_post_message("T123", "C123")?;
/// assert!(wait.is_immediate());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    executor_name: String,
    fail_open: bool,
    registry: Arc<TierRegistry>,
    resolver: Arc<dyn CustomRateLimitResolver>,
    calculator: WaitTimeCalculator,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("executor_name", &self.executor_name)
            .field("fail_open", &self.fail_open)
            .field("registry", &self.registry)
            .field("calculator", &self.calculator)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Creates a new limiter builder.
    pub fn builder() -> RateLimiterBuilder {
        RateLimiterBuilder::default()
    }

    /// Limiter configured from a [`PacekeeperConfig`], resolving overrides
    /// from its `[overrides]` section and reading time from the system clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration does not validate.
    pub fn from_config(
        config: &PacekeeperConfig,
        metrics_datastore: Arc<dyn MetricsDatastore>,
    ) -> PacekeeperResult<Self> {
        config.validate()?;
        Self::builder()
            .executor_name(config.executor_name().clone())
            .fail_open(*config.fail_open())
            .approaching_ratio(*config.approaching_ratio())
            .registry(config.tier_registry()?)
            .resolver(Arc::new(ConfiguredRateLimits::new(config.overrides())))
            .metrics_datastore(metrics_datastore)
            .build()
    }

    /// Name of the executor this limiter does bookkeeping for.
    pub fn executor_name(&self) -> &str {
        &self.executor_name
    }

    /// Store consulted for cool-downs, node count and request history.
    pub fn metrics_datastore(&self) -> &Arc<dyn MetricsDatastore> {
        self.calculator.metrics_datastore()
    }

    /// Tier registry used when no override applies.
    pub fn registry(&self) -> &TierRegistry {
        &self.registry
    }

    /// Wait time before calling a method throttled per team.
    #[instrument(skip(self), fields(executor = %self.executor_name))]
    pub fn acquire_wait_time(&self, team_id: &str, method_name: &str) -> PacekeeperResult<WaitTime> {
        let key = RequestScopeKey::for_method(&self.executor_name, team_id, method_name);
        self.acquire(&key, || self.allowed_requests_per_minute(team_id, method_name))
    }

    /// Wait time before posting a message to `channel_id`.
    #[instrument(skip(self), fields(executor = %self.executor_name))]
    pub fn acquire_wait_time_for_chat_post_message(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> PacekeeperResult<WaitTime> {
        let key =
            RequestScopeKey::for_channel(&self.executor_name, team_id, CHAT_POST_MESSAGE, channel_id);
        self.acquire(&key, || {
            self.allowed_requests_for_chat_post_message_per_minute(team_id, channel_id)
        })
    }

    /// Wait time before setting an assistant thread status in `channel_id`.
    #[instrument(skip(self), fields(executor = %self.executor_name))]
    pub fn acquire_wait_time_for_assistant_threads_set_status(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> PacekeeperResult<WaitTime> {
        let key = RequestScopeKey::for_channel(
            &self.executor_name,
            team_id,
            ASSISTANT_THREADS_SET_STATUS,
            channel_id,
        );
        self.acquire(&key, || {
            self.allowed_requests_for_assistant_threads_set_status_per_minute(team_id, channel_id)
        })
    }

    /// Resolved quota for a method throttled per team: override, else tier default.
    pub fn allowed_requests_per_minute(&self, team_id: &str, method_name: &str) -> PacekeeperResult<u32> {
        let custom = self
            .resolver
            .custom_allowed_requests_per_minute(team_id, method_name);
        self.resolve(custom, || self.registry.allowed_requests_per_minute_for_method(method_name))
    }

    /// Resolved quota for posting messages to a channel.
    pub fn allowed_requests_for_chat_post_message_per_minute(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> PacekeeperResult<u32> {
        let custom = self
            .resolver
            .custom_allowed_requests_for_chat_post_message_per_minute(team_id, channel_id);
        self.resolve(custom, || {
            self.registry
                .allowed_requests_per_minute(RateLimitTier::SpecialChatPostMessage)
        })
    }

    /// Resolved quota for assistant thread status updates in a channel.
    pub fn allowed_requests_for_assistant_threads_set_status_per_minute(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> PacekeeperResult<u32> {
        let custom = self
            .resolver
            .custom_allowed_requests_for_assistant_threads_set_status_per_minute(team_id, channel_id);
        self.resolve(custom, || {
            self.registry
                .allowed_requests_per_minute(RateLimitTier::SpecialAssistantThreadsSetStatus)
        })
    }

    fn acquire(
        &self,
        key: &RequestScopeKey,
        allowed_per_minute: impl FnOnce() -> PacekeeperResult<u32>,
    ) -> PacekeeperResult<WaitTime> {
        if let Some(until) = self.calculator.rate_limited_method_retry_epoch_millis(key)? {
            let now = self.clock.now_epoch_millis();
            if until <= now {
                debug!(%key, until, now, "Cool-down already expired, clamping wait to zero");
            }
            let wait = WaitTime::new(until.saturating_sub(now), Pace::RateLimited);
            debug!(%key, millis_to_wait = *wait.millis_to_wait(), "Cool-down in force");
            return Ok(wait);
        }

        let allowed = allowed_per_minute()?;
        self.calculator.calculate_wait_time(key, allowed)
    }

    fn resolve(
        &self,
        custom: PacekeeperResult<Option<u32>>,
        tier_default: impl FnOnce() -> u32,
    ) -> PacekeeperResult<u32> {
        let custom = match custom {
            Ok(custom) => custom,
            Err(e) if self.fail_open => {
                warn!(error = %e, "Custom rate limit resolver failed, using tier default");
                None
            }
            Err(e) => return Err(e),
        };

        match custom {
            Some(allowed) => {
                debug!(allowed, "Using custom quota");
                Ok(allowed)
            }
            None => Ok(tier_default()),
        }
    }
}

/// Builder for [`RateLimiter`].
///
/// Only the metrics store is required. Defaults: executor
/// `"default-executor"`, no custom overrides, published tier quotas, system
/// clock, fail-loud.
#[derive(Default)]
pub struct RateLimiterBuilder {
    executor_name: Option<String>,
    fail_open: Option<bool>,
    approaching_ratio: Option<f64>,
    registry: Option<TierRegistry>,
    resolver: Option<Arc<dyn CustomRateLimitResolver>>,
    metrics_datastore: Option<Arc<dyn MetricsDatastore>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RateLimiterBuilder {
    /// Sets the executor name.
    pub fn executor_name(mut self, value: impl Into<String>) -> Self {
        self.executor_name = Some(value.into());
        self
    }

    /// Sets whether collaborator failures are swallowed.
    pub fn fail_open(mut self, value: bool) -> Self {
        self.fail_open = Some(value);
        self
    }

    /// Sets the share of the quota at which usage is logged as approaching.
    pub fn approaching_ratio(mut self, value: f64) -> Self {
        self.approaching_ratio = Some(value);
        self
    }

    /// Sets the tier registry.
    pub fn registry(mut self, value: TierRegistry) -> Self {
        self.registry = Some(value);
        self
    }

    /// Sets the custom override resolver.
    pub fn resolver(mut self, value: Arc<dyn CustomRateLimitResolver>) -> Self {
        self.resolver = Some(value);
        self
    }

    /// Sets the metrics store.
    pub fn metrics_datastore(mut self, value: Arc<dyn MetricsDatastore>) -> Self {
        self.metrics_datastore = Some(value);
        self
    }

    /// Sets the clock.
    pub fn clock(mut self, value: Arc<dyn Clock>) -> Self {
        self.clock = Some(value);
        self
    }

    /// Builds the [`RateLimiter`].
    ///
    /// # Errors
    ///
    /// Returns a builder error if no metrics store was given, the executor
    /// name is empty, or the approaching ratio is outside `(0.0, 1.0]`.
    pub fn build(self) -> PacekeeperResult<RateLimiter> {
        let metrics_datastore = self.metrics_datastore.ok_or_else(|| {
            BuilderError::new(BuilderErrorKind::MissingField("metrics_datastore".to_string()))
        })?;

        let executor_name = self
            .executor_name
            .unwrap_or_else(|| DEFAULT_EXECUTOR_NAME.to_string());
        if executor_name.trim().is_empty() {
            return Err(BuilderError::new(BuilderErrorKind::InvalidField {
                field: "executor_name".to_string(),
                reason: "must not be empty".to_string(),
            })
            .into());
        }

        let approaching_ratio = self.approaching_ratio.unwrap_or(DEFAULT_APPROACHING_RATIO);
        if !(approaching_ratio > 0.0 && approaching_ratio <= 1.0) {
            return Err(BuilderError::new(BuilderErrorKind::InvalidField {
                field: "approaching_ratio".to_string(),
                reason: format!("must be in (0.0, 1.0], got {}", approaching_ratio),
            })
            .into());
        }

        let fail_open = self.fail_open.unwrap_or(false);
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        debug!(executor_name = %executor_name, fail_open, approaching_ratio, "Building rate limiter");

        Ok(RateLimiter {
            calculator: WaitTimeCalculator::new(
                metrics_datastore,
                Arc::clone(&clock),
                approaching_ratio,
                fail_open,
            ),
            executor_name,
            fail_open,
            registry: Arc::new(self.registry.unwrap_or_default()),
            resolver: self
                .resolver
                .unwrap_or_else(|| Arc::new(NoCustomRateLimits)),
            clock,
        })
    }
}
