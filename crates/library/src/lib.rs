//! Cache-backed retrieval and listing of the opensource.apple.com catalog.
//!
//! The [`IndexFetcher`] decides whether an index document is served from the
//! [cache](aos_cache) or refreshed from the [remote](aos_remote). The
//! operations built on top of it ([`list`], [`versions`], [`fetch_release`])
//! parse the documents with [`aos_index`] and render plain text for the
//! command line.

pub mod cache;
pub mod error;
mod fetch;
mod list;
mod release;

pub use crate::fetch::IndexFetcher;
pub use crate::list::{LINE_SEPARATOR, ListOptions, list, render};
pub use crate::release::{fetch_release, render_versions, versions};
