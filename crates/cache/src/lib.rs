//! On-disk cache for catalog index documents.
//!
//! The cache is not the source of truth, the remote catalog is. Deleting the
//! cache directory only means the next run fetches every index again.
//!
//! # Layout
//! - `<root>/<category>.html` for each category index (`tarballs.html`,
//!   `source.html`).
//! - `<root>/<category>/<project>.html` for per-project index pages.

pub mod error;
mod file;
mod key;
mod store;

pub use crate::file::CachedFile;
pub use crate::key::CacheKey;
pub use crate::store::CacheStore;
