//! Error types for the logging harness

use thiserror::Error;

/// Result type alias using [`HarnessError`]
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Harness error types
///
/// A failed append to the per-run log is fatal to the caller; only
/// rotation downgrades its errors (see [`crate::rotate`]).
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
