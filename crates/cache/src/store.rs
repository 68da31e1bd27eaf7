//! Local filesystem cache for raw index documents.
//!
//! The cache is crude on purpose: one file per key, and the existence of that
//! file is the only freshness signal (no TTL, no checksum). The bypass switch
//! turns every lookup into a miss without stopping writes, so a bypassed run
//! still refreshes the cache for the runs after it.

use exn::ResultExt;
use std::fs::{self, DirBuilder, DirEntry, Metadata, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::file::CachedFile;
use crate::key::{CacheKey, is_html_path};

// Unix permission bits for created cache directories and documents.
#[cfg(unix)]
const DIR_MODE: u32 = 0o775;
#[cfg(unix)]
const FILE_MODE: u32 = 0o664;

enum WalkEntry {
    File(CachedFile),
    Descend(PathBuf),
    Skip,
}

/// Disk cache for raw index documents, keyed by [`CacheKey`].
///
/// # Examples
///
/// ```no_run
/// use aos_cache::CacheStore;
/// use aos_index::models::Category;
///
/// # fn example() -> aos_cache::error::Result<()> {
/// let cache = CacheStore::new("/home/me/.cache/appleopensource", false);
/// if !cache.has(Category::Tarballs) {
///     cache.write(Category::Tarballs, b"<html>...</html>")?;
/// }
/// let html = cache.read(Category::Tarballs)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Root directory; created lazily on first write.
    root: PathBuf,
    /// When set, [`has`](Self::has) always reports a miss.
    bypass: bool,
}
impl CacheStore {
    pub fn new(root: impl Into<PathBuf>, bypass: bool) -> Self {
        Self { root: root.into(), bypass }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    /// Absolute location of a key. Pure path composition; never touches the
    /// filesystem and never fails.
    pub fn resolve(&self, key: impl Into<CacheKey>) -> PathBuf {
        self.root.join(key.into())
    }

    /// Whether a document is cached for `key`.
    ///
    /// Always `false` while bypassed, regardless of what is on disk.
    #[instrument(level = "debug", skip_all, fields(bypass = self.bypass))]
    pub fn has(&self, key: impl Into<CacheKey>) -> bool {
        if self.bypass {
            tracing::debug!("cache bypassed");
            return false;
        }
        let path = self.resolve(key);
        let exists = path.is_file();
        tracing::debug!(path = %path.display(), exists, "cache lookup");
        exists
    }

    /// Reads a cached document verbatim.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if nothing is
    /// cached for `key`. Reads are not affected by bypass.
    pub fn read(&self, key: impl Into<CacheKey>) -> Result<Vec<u8>> {
        let path = self.resolve(key);
        let data = fs::read(&path).map_err(|e| Self::map_io_error(e, &path))?;
        tracing::debug!(path = %path.display(), size = data.len(), "cache hit");
        Ok(data)
    }

    /// Creates the cache root (and any missing parents). Idempotent.
    pub fn ensure_root(&self) -> Result<&Path> {
        Self::create_dir(&self.root).or_raise(|| ErrorKind::WriteFailed(self.root.clone()))?;
        Ok(&self.root)
    }

    /// Stores a document, fully replacing whatever was cached for `key`.
    ///
    /// Missing directories are created first. Any failure is reported as
    /// [`WriteFailed`](crate::error::ErrorKind::WriteFailed) with the I/O
    /// error attached.
    #[instrument(level = "debug", skip_all, fields(size = data.len()))]
    pub fn write(&self, key: impl Into<CacheKey>, data: &[u8]) -> Result<()> {
        let path = self.resolve(key);
        let parent = path.parent().unwrap_or(&self.root);
        Self::create_dir(parent).or_raise(|| ErrorKind::WriteFailed(path.clone()))?;
        Self::write_file(&path, data).or_raise(|| ErrorKind::WriteFailed(path.clone()))?;
        tracing::debug!(path = %path.display(), hash = %blake3::hash(data), "cached document");
        Ok(())
    }

    /// Deletes one cached document.
    pub fn remove(&self, key: impl Into<CacheKey>) -> Result<()> {
        let path = self.resolve(key);
        Ok(fs::remove_file(&path).map_err(|e| Self::map_io_error(e, &path))?)
    }

    /// Lists every cached document, sorted by key.
    ///
    /// Only `.html` files count as cache entries; anything else that happens
    /// to live in the directory is ignored. A cache root that does not exist
    /// yet is simply empty.
    pub fn entries(&self) -> Result<Vec<CachedFile>> {
        let mut files = Vec::new();
        let mut stack = vec![self.root.clone()];
        while let Some(current) = stack.pop() {
            let entries = match fs::read_dir(&current) {
                Ok(entries) => entries,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => exn::bail!(Self::map_io_error(err, &current)),
            };
            for entry in entries {
                let entry = entry.map_err(|e| Self::map_io_error(e, &current))?;
                match self.process_entry(entry)? {
                    WalkEntry::File(file) => files.push(file),
                    WalkEntry::Descend(dir) => stack.push(dir),
                    WalkEntry::Skip => {},
                }
            }
        }
        files.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(files)
    }

    /// Deletes every cached document, returning how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let entries = self.entries()?;
        for file in &entries {
            self.remove(file.key.clone())?;
        }
        tracing::info!(root = %self.root.display(), removed = entries.len(), "cleared cache");
        Ok(entries.len())
    }

    fn process_entry(&self, entry: DirEntry) -> Result<WalkEntry> {
        let path = entry.path();
        let metadata = entry.metadata().map_err(|e| Self::map_io_error(e, &path))?;
        if metadata.is_dir() {
            return Ok(WalkEntry::Descend(path));
        }
        // Note: silently drop what is most likely a broken symlink.
        if !metadata.is_file() || !is_html_path(&path) {
            return Ok(WalkEntry::Skip);
        }
        let relative = path.strip_prefix(&self.root).or_raise(|| ErrorKind::InvalidKey(path.clone()))?;
        let key = CacheKey::new(relative)?;
        Ok(WalkEntry::File(Self::metadata(key, metadata)?))
    }

    fn metadata(key: CacheKey, metadata: Metadata) -> Result<CachedFile> {
        let modified = metadata.modified().map_err(ErrorKind::Io)?.into();
        Ok(CachedFile::new(key, metadata.len(), modified))
    }

    fn create_dir(path: &Path) -> std::io::Result<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DIR_MODE);
        builder.create(path)
    }

    fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);
        let mut file = options.open(path)?;
        file.write_all(data)?;
        file.flush()
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}
