//! Quota report query errors.

/// Kinds of quota report errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ReportErrorKind {
    /// The method is paced per channel and no channel was given
    #[display("{} is paced per channel; a channel id is required", method)]
    ChannelRequired {
        /// The per-channel method
        method: String,
    },
}

/// Quota report error with location tracking.
///
/// # Examples
///
/// ```
/// use pacekeeper_error::{ReportError, ReportErrorKind};
///
/// let err = ReportError::new(ReportErrorKind::ChannelRequired {
///     method: "chat.postMessage".to_string(),
/// });
/// assert!(format!("{}", err).contains("channel id is required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Report Error: {} at line {} in {}", kind, line, file)]
pub struct ReportError {
    /// The kind of error that occurred
    pub kind: ReportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ReportError {
    /// Create a new report error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ReportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
