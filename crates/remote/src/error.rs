//! Remote Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A remote retrieval error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configured base URL (or a URL derived from it) is unusable.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// The HTTP client could not be constructed.
    #[display("failed to build HTTP client")]
    Client,
    /// Connection, TLS or body transfer failure.
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// The request did not complete within the configured timeout.
    #[display("request timed out: {_0}")]
    Timeout(#[error(not(source))] String),
    /// The server answered with a non-success status.
    #[display("HTTP {status} from {url}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidUrl(_) | Self::Client => false,
        }
    }
}
