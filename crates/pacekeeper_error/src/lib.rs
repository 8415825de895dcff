//! Error types for the pacekeeper workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use pacekeeper_error::{PacekeeperResult, StoreError, StoreErrorKind};
//!
//! fn read_window() -> PacekeeperResult<usize> {
//!     Err(StoreError::new(StoreErrorKind::Unavailable("redis down".into())))?
//! }
//!
//! match read_window() {
//!     Ok(count) => println!("Window holds {} requests", count),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod json;
mod report;
mod resolver;
mod store;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{PacekeeperError, PacekeeperErrorKind, PacekeeperResult};
pub use json::JsonError;
pub use report::{ReportError, ReportErrorKind};
pub use resolver::ResolverError;
pub use store::{StoreError, StoreErrorKind};
