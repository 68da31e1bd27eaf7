//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {}", _0.display())]
    MissingFile(#[error(not(source))] PathBuf),
    /// The configuration file extension is not one of toml, yaml, yml or json.
    #[display("unsupported configuration format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// The merged configuration could not be deserialized.
    #[display("invalid configuration")]
    Invalid,
    /// A setting has a value that can never work.
    #[display("invalid setting {key}: {reason}")]
    Validation {
        /// Dotted setting name.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// No cache directory was configured and none could be derived from the platform.
    #[display("could not determine a cache directory; set cache.dir")]
    NoCacheDirectory,
    /// The remote client could not be built from the configured settings.
    #[display("could not configure remote")]
    Remote,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Configuration errors are never transient; the configuration has to change.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
