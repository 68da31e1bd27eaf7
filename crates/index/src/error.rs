//! Index Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An index parsing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes cannot be interpreted as a directory listing at all. An
    /// index that lists zero entries is *not* malformed.
    #[display("malformed index document: {_0}")]
    MalformedDocument(#[error(not(source))] &'static str),
    /// The category name is not one of the known catalog categories.
    #[display("unknown category: {_0}")]
    UnknownCategory(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Parsing is deterministic; the same bytes fail the same way.
        false
    }
}
