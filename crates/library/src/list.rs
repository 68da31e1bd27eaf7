use aos_index::models::{Category, ProjectListing};
use exn::ResultExt;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::fetch::IndexFetcher;

/// Separator between rendered names. Output never ends with it.
pub const LINE_SEPARATOR: &str = "\n";

/// Category switches of the `list` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub tarballs: bool,
    pub source: bool,
}
impl ListOptions {
    pub fn category(&self) -> Category {
        Category::select(self.tarballs, self.source)
    }
}

/// Lists every project name of the selected category, one per line.
///
/// The cache bypass is a property of the fetcher's [`CacheStore`](aos_cache::CacheStore).
#[instrument(skip(fetcher))]
pub fn list(fetcher: &IndexFetcher, options: ListOptions) -> Result<String> {
    let category = options.category();
    let document = fetcher.fetch(category)?;
    let listing = parse_document(&document)?;
    tracing::debug!(%category, entries = listing.len(), "listing projects");
    Ok(render(&listing))
}

/// Names joined by [`LINE_SEPARATOR`], without a trailing separator. An empty
/// listing renders as an empty string.
pub fn render(listing: &ProjectListing) -> String {
    join_lines(listing.names())
}

pub(crate) fn join_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> String {
    lines.into_iter().collect::<Vec<_>>().join(LINE_SEPARATOR)
}

pub(crate) fn parse_document(document: &[u8]) -> Result<ProjectListing> {
    aos_index::parse(document).or_raise(|| ErrorKind::MalformedDocument)
}
