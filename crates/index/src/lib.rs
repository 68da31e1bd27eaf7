//! Index parsing for opensource.apple.com style catalogs.
//!
//! The catalog is published as plain directory listings: one document per
//! [`Category`](models::Category) naming every project, and one document per
//! project naming its release tarballs. This crate turns those documents into
//! ordered [`ProjectListing`](models::ProjectListing)s.

mod consts;
pub mod error;
mod listing;
pub mod models;
mod sniff;
mod source;

use tracing::instrument;

use crate::error::Result;
use crate::models::ProjectListing;
pub use crate::sniff::SNIFF_SIZE_BYTES;
pub use crate::source::{Candidate, EntrySource, HtmlIndex};

/// Easy, top-level entrypoint for turning a raw index document into a
/// [`ProjectListing`].
///
/// # Errors
///
/// Returns [`MalformedDocument`](error::ErrorKind::MalformedDocument) when
/// the bytes are not an index document at all. A document without any
/// entries is a valid, empty listing.
///
/// # Examples
///
/// ```rust
/// let html = br#"<html><body><pre>
/// <a href="../">Parent Directory</a>
/// <a href="CF/">CF/</a>
/// <a href="Libc/">Libc/</a>
/// </pre></body></html>"#;
/// let listing = aos_index::parse(html).unwrap();
/// assert_eq!(listing.names().collect::<Vec<_>>(), vec!["CF", "Libc"]);
/// ```
#[instrument(skip(html), fields(html_size = html.as_ref().len(), entries))]
pub fn parse(html: impl AsRef<[u8]>) -> Result<ProjectListing> {
    let index = HtmlIndex::parse(html.as_ref())?;
    let listing = ProjectListing::from_source(&index);
    tracing::Span::current().record("entries", listing.len());
    Ok(listing)
}

/// Returns `true` if the bytes can be an index document (which may still
/// list zero entries).
pub fn is_index(html: impl AsRef<[u8]>) -> bool {
    sniff::check(html.as_ref()).is_ok()
}
