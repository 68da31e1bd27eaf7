//! Cache maintenance helpers for the `cache` command.

use aos_cache::{CacheStore, CachedFile};
use exn::ResultExt;
use time::format_description::well_known::Rfc3339;

use crate::error::{ErrorKind, Result};
use crate::list::join_lines;

/// One line per cached document: key, size in bytes and last refresh time.
pub fn report(cache: &CacheStore) -> Result<String> {
    let entries = cache.entries().or_raise(|| ErrorKind::Cache)?;
    let lines = entries.iter().map(describe).collect::<Result<Vec<_>>>()?;
    Ok(join_lines(lines.iter().map(String::as_str)))
}

/// Removes every cached document, returning how many were removed.
pub fn clear(cache: &CacheStore) -> Result<usize> {
    cache.clear().or_raise(|| ErrorKind::Cache)
}

fn describe(file: &CachedFile) -> Result<String> {
    let modified = file.modified.format(&Rfc3339).or_raise(|| ErrorKind::Cache)?;
    Ok(format!("{}\t{}\t{modified}", file.key, file.size))
}
