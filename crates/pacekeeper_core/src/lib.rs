//! Core data types for the pacekeeper request-pacing library.
//!
//! This crate provides the values every pacing decision is expressed in:
//! the [`WaitTime`] handed back to callers, the [`Pace`] classification, the
//! [`RequestScopeKey`] under which usage and cool-downs are tracked, and the
//! [`Clock`] abstraction all "now" readings go through.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod scope;
mod telemetry;
mod wait_time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scope::{RequestScopeKey, channel_scoped_method_key};
pub use telemetry::init_tracing;
pub use wait_time::{Pace, WaitTime};

/// Length of the trailing window request history is counted over.
pub const WINDOW_MILLIS: u64 = 60_000;
