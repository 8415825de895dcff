//! Pacing decisions returned to callers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classification of a pacing decision.
///
/// `Normal` carries a zero wait; `Exceeded` and `RateLimited` tell the
/// caller to back off.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Pace {
    /// No material backlog in the trailing window
    Normal,
    /// The per-node quota for the trailing window is used up
    Exceeded,
    /// The server reported a cool-down that is still in force
    RateLimited,
}

impl Pace {
    /// Whether the caller should delay before issuing the request.
    pub fn should_back_off(&self) -> bool {
        matches!(self, Pace::Exceeded | Pace::RateLimited)
    }
}

/// Advisory delay computed for one outbound call.
///
/// Produced fresh on every acquisition and never stored. The caller decides
/// how to wait (blocking sleep, timer, cooperative yield).
///
/// # Examples
///
/// ```
/// use pacekeeper_core::{Pace, WaitTime};
/// use std::time::Duration;
///
/// let wait = WaitTime::new(1_500, Pace::Exceeded);
/// assert_eq!(wait.as_duration(), Duration::from_millis(1_500));
/// assert!(wait.pace().should_back_off());
/// assert!(WaitTime::immediate().is_immediate());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display("{}ms ({})", millis_to_wait, pace)]
pub struct WaitTime {
    /// Milliseconds the caller should wait before calling
    millis_to_wait: u64,
    /// Classification of the decision
    pace: Pace,
}

impl WaitTime {
    /// Create a wait time.
    pub fn new(millis_to_wait: u64, pace: Pace) -> Self {
        Self {
            millis_to_wait,
            pace,
        }
    }

    /// No wait, normal pace.
    pub fn immediate() -> Self {
        Self::new(0, Pace::Normal)
    }

    /// The wait as a [`Duration`], ready to hand to a sleep primitive.
    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.millis_to_wait)
    }

    /// True when no delay is needed.
    pub fn is_immediate(&self) -> bool {
        self.millis_to_wait == 0
    }
}
