//! Custom rate limit resolver errors.

/// Raised by a custom override resolver that could not answer.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Resolver Error: {} at line {} in {}", message, line, file)]
pub struct ResolverError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ResolverError {
    /// Create a new ResolverError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
