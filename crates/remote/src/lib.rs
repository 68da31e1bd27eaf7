//! Remote retrieval of catalog documents.
//!
//! [`RemoteIndex`] is the seam between the cache-backed pipeline and the
//! network: the pipeline only ever asks for "the index of a category", "the
//! index page of a project" or "this file of a project". [`HttpRemote`] talks
//! to an opensource.apple.com style server; `MockRemote` (behind the `mock`
//! feature) serves canned documents to tests.

pub mod error;
mod http;
#[cfg(feature = "mock")]
mod mock;

pub use crate::http::HttpRemote;
#[cfg(feature = "mock")]
pub use crate::mock::MockRemote;
use crate::error::Result;
use std::sync::Arc;

pub type RemoteHandle = Arc<dyn RemoteIndex>;

/// Source of live catalog documents.
///
/// Implementations make no promises about retries or caching; every call is
/// one retrieval. Failures are reported, never papered over with partial
/// data.
pub trait RemoteIndex: Send + Sync {
    /// Name of the remote (the base URL for HTTP), used for logging only.
    fn name(&self) -> &str;

    /// Retrieve the index document listing every project of a category.
    fn index_project(&self, category: &str) -> Result<Vec<u8>>;

    /// Retrieve the index page of a single project within a category.
    fn index_page(&self, category: &str, project: &str) -> Result<Vec<u8>>;

    /// Retrieve a file (usually a release tarball) belonging to a project.
    fn download(&self, category: &str, project: &str, file: &str) -> Result<Vec<u8>>;
}
