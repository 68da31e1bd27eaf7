use std::path::Path;
use time::OffsetDateTime;

use crate::key::CacheKey;

/// Metadata of one cached document, as reported by
/// [`CacheStore::entries`](crate::CacheStore::entries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    /// Location relative to the cache root
    pub key: CacheKey,
    /// File size in bytes
    pub size: u64,
    /// Last modified timestamp (the time of the last remote refresh)
    pub modified: OffsetDateTime,
}
impl CachedFile {
    pub fn new(key: CacheKey, size: u64, modified: OffsetDateTime) -> Self {
        Self { key, size, modified }
    }

    pub fn path(&self) -> &Path {
        self.key.as_path()
    }
}
