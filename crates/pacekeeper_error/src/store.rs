//! Metrics store error types.

/// Kinds of metrics store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Backing store could not be reached
    #[display("Metrics store unavailable: {}", _0)]
    Unavailable(String),
    /// A lock guarding shared state was poisoned by a panicking writer
    #[display("Lock poisoned: {}", _0)]
    LockPoisoned(String),
    /// Node count must be at least one
    #[display("Invalid node count: {}", _0)]
    InvalidNodeCount(u32),
}

/// Metrics store error with location tracking.
///
/// # Examples
///
/// ```
/// use pacekeeper_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Unavailable("connection refused".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
