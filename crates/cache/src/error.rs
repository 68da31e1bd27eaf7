//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No cached document exists; fetch it from the remote instead.
    #[display("cache entry not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied to the cache directory or one of its files.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Persisting a document failed (permissions, disk full, a file where a
    /// directory should be). The I/O error is attached to the error tree.
    #[display("failed to write cache entry: {}", _0.display())]
    WriteFailed(#[error(not(source))] PathBuf),
    /// Key contains invalid characters or escapes the cache root.
    #[display("invalid cache key: {}", _0.display())]
    InvalidKey(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::WriteFailed(_))
    }
}
