//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Failures of the underlying crates
//! (cache, remote, index) stay attached as the cause of each error.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a failure.
///
/// ### Dependency Errors
/// - [`ErrorKind::Cache`]
/// - [`ErrorKind::RemoteRetrievalFailed`]
/// - [`ErrorKind::MalformedDocument`]
///
/// ### Operational Errors
/// - [`ErrorKind::InvalidProject`]
/// - [`ErrorKind::ReleaseNotFound`]
/// - [`ErrorKind::Io`]
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading, writing or listing the local cache failed.
    #[display("cache operation failed")]
    Cache,
    /// The remote catalog could not deliver a document.
    #[display("failed to retrieve {_0} from remote")]
    RemoteRetrievalFailed(#[error(not(source))] String),
    /// A retrieved (or cached) document is not an index document.
    #[display("malformed index document")]
    MalformedDocument,
    /// The project name cannot be used to address the catalog.
    #[display("invalid project name: {_0}")]
    InvalidProject(#[error(not(source))] String),
    /// The project page does not list the requested version.
    #[display("no release {version} of {project}")]
    ReleaseNotFound {
        project: String,
        version: String,
    },
    /// Writing a downloaded file to its destination failed.
    #[display("could not write {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RemoteRetrievalFailed(_) => true,
            Self::Cache
            | Self::MalformedDocument
            | Self::InvalidProject(_)
            | Self::ReleaseNotFound { .. }
            | Self::Io(_) => false,
        }
    }
}
