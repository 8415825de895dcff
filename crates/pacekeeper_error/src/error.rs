//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, JsonError, ReportError, ResolverError, StoreError};

/// Every failure the pacekeeper crates can surface.
///
/// # Examples
///
/// ```
/// use pacekeeper_error::{PacekeeperError, ConfigError};
///
/// let err: PacekeeperError = ConfigError::new("zero quota").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PacekeeperErrorKind {
    /// Metrics store error
    #[from(StoreError)]
    Store(StoreError),
    /// Custom override resolver error
    #[from(ResolverError)]
    Resolver(ResolverError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// JSON rendering error
    #[from(JsonError)]
    Json(JsonError),
    /// Quota report query error
    #[from(ReportError)]
    Report(ReportError),
}

/// Pacekeeper error with kind discrimination.
///
/// # Examples
///
/// ```
/// use pacekeeper_error::{PacekeeperErrorKind, PacekeeperResult, StoreError, StoreErrorKind};
///
/// fn might_fail() -> PacekeeperResult<()> {
///     Err(StoreError::new(StoreErrorKind::InvalidNodeCount(0)))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), PacekeeperErrorKind::Store(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Pacekeeper Error: {}", _0)]
pub struct PacekeeperError(Box<PacekeeperErrorKind>);

impl PacekeeperError {
    /// Create a new error from a kind.
    pub fn new(kind: PacekeeperErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PacekeeperErrorKind {
        &self.0
    }
}

impl<T> From<T> for PacekeeperError
where
    T: Into<PacekeeperErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for pacekeeper operations.
pub type PacekeeperResult<T> = std::result::Result<T, PacekeeperError>;
