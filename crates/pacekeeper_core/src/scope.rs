//! Identity under which request history and cool-downs are tracked.

use serde::{Deserialize, Serialize};

/// Build the tracking key for a method throttled per channel.
///
/// The channel is folded into the method name as `<method>_<channel>`.
/// Transport code that records call outcomes must build its keys with this
/// function too; a different string silently disables pacing for the method.
///
/// # Examples
///
/// ```
/// use pacekeeper_core::channel_scoped_method_key;
///
/// assert_eq!(
///     channel_scoped_method_key("chat.postMessage", "C123"),
///     "chat.postMessage_C123"
/// );
/// ```
pub fn channel_scoped_method_key(method_name: &str, channel_id: &str) -> String {
    format!("{}_{}", method_name, channel_id)
}

/// Composite identity `(executor, team, method key)`.
///
/// For ordinary methods the method key is the method name. For methods the
/// remote service throttles per channel it is the output of
/// [`channel_scoped_method_key`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display("{}/{}/{}", executor_name, team_id, method_key)]
pub struct RequestScopeKey {
    /// Process instance doing the bookkeeping
    executor_name: String,
    /// Team (workspace) the credential belongs to
    team_id: String,
    /// Method name, optionally suffixed with a channel
    method_key: String,
}

impl RequestScopeKey {
    /// Key for a method throttled per team.
    pub fn for_method(
        executor_name: impl Into<String>,
        team_id: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            executor_name: executor_name.into(),
            team_id: team_id.into(),
            method_key: method_name.into(),
        }
    }

    /// Key for a method throttled per channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use pacekeeper_core::RequestScopeKey;
    ///
    /// let key = RequestScopeKey::for_channel("worker-1", "T1", "chat.postMessage", "C123");
    /// assert_eq!(key.method_key(), "chat.postMessage_C123");
    /// ```
    pub fn for_channel(
        executor_name: impl Into<String>,
        team_id: impl Into<String>,
        method_name: &str,
        channel_id: &str,
    ) -> Self {
        Self {
            executor_name: executor_name.into(),
            team_id: team_id.into(),
            method_key: channel_scoped_method_key(method_name, channel_id),
        }
    }
}
