use aos_cache::{CacheKey, CacheStore};
use aos_index::models::Category;
use aos_remote::{RemoteHandle, RemoteIndex};
use exn::ResultExt;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Retrieves raw index documents, serving them from the cache when possible.
///
/// On a miss the document is retrieved from the remote exactly once, written
/// to the cache verbatim and returned. Nothing is cached when the retrieval
/// fails, and a failed cache write fails the whole fetch.
pub struct IndexFetcher {
    cache: CacheStore,
    remote: RemoteHandle,
}
impl IndexFetcher {
    pub fn new(cache: CacheStore, remote: RemoteHandle) -> Self {
        Self { cache, remote }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn remote(&self) -> &dyn RemoteIndex {
        self.remote.as_ref()
    }

    /// Index document of a whole category.
    #[instrument(skip(self), fields(remote = self.remote.name()))]
    pub fn fetch(&self, category: Category) -> Result<Vec<u8>> {
        self.fetch_cached(CacheKey::from(category), category.as_str(), || {
            self.remote.index_project(category.as_str())
        })
    }

    /// Index page of a single project.
    #[instrument(skip(self), fields(remote = self.remote.name()))]
    pub fn fetch_project(&self, category: Category, project: &str) -> Result<Vec<u8>> {
        let key =
            CacheKey::project(category, project).or_raise(|| ErrorKind::InvalidProject(project.to_string()))?;
        self.fetch_cached(key, &format!("{category}/{project}"), || {
            self.remote.index_page(category.as_str(), project)
        })
    }

    fn fetch_cached<F>(&self, key: CacheKey, label: &str, retrieve: F) -> Result<Vec<u8>>
    where
        F: FnOnce() -> aos_remote::error::Result<Vec<u8>>,
    {
        if self.cache.has(key.clone()) {
            return self.cache.read(key).or_raise(|| ErrorKind::Cache);
        }
        self.cache.ensure_root().or_raise(|| ErrorKind::Cache)?;
        let document = retrieve().or_raise(|| ErrorKind::RemoteRetrievalFailed(label.to_string()))?;
        self.cache.write(key.clone(), &document).or_raise(|| ErrorKind::Cache)?;
        tracing::info!(%key, size = document.len(), "refreshed index from remote");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aos_remote::MockRemote;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn fetcher(remote: &Arc<MockRemote>, bypass: bool) -> (TempDir, IndexFetcher) {
        let temp = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(temp.path().join("cache"), bypass);
        (temp, IndexFetcher::new(cache, remote.clone()))
    }

    #[test]
    fn cache_hit_avoids_remote() {
        let remote = Arc::new(MockRemote::with_documents([("tarballs", "REMOTE")]));
        let (_temp, fetcher) = fetcher(&remote, false);
        fetcher.cache().write(Category::Tarballs, b"CACHED").unwrap();

        assert_eq!(fetcher.fetch(Category::Tarballs).unwrap(), b"CACHED");
        assert!(remote.calls().is_empty());
    }

    #[test]
    fn cache_miss_retrieves_once_and_writes() {
        let remote = Arc::new(MockRemote::with_documents([("tarballs", "REMOTE")]));
        let (_temp, fetcher) = fetcher(&remote, false);

        assert_eq!(fetcher.fetch(Category::Tarballs).unwrap(), b"REMOTE");
        assert_eq!(remote.call_count("tarballs"), 1);
        assert_eq!(fetcher.cache().read(Category::Tarballs).unwrap(), b"REMOTE");

        // Second fetch is served from the cache.
        assert_eq!(fetcher.fetch(Category::Tarballs).unwrap(), b"REMOTE");
        assert_eq!(remote.call_count("tarballs"), 1);
    }

    #[test]
    fn bypass_refreshes_cache() {
        let remote = Arc::new(MockRemote::with_documents([("source", "NEW")]));
        let (_temp, fetcher) = fetcher(&remote, true);
        fetcher.cache().write(Category::Source, b"OLD").unwrap();

        assert_eq!(fetcher.fetch(Category::Source).unwrap(), b"NEW");
        assert_eq!(remote.call_count("source"), 1);
        assert_eq!(fetcher.cache().read(Category::Source).unwrap(), b"NEW");
    }

    #[test]
    fn remote_failure_leaves_cache_untouched() {
        let remote = Arc::new(MockRemote::default().with_status("tarballs", 503));
        let (_temp, fetcher) = fetcher(&remote, false);

        let err = fetcher.fetch(Category::Tarballs).unwrap_err();
        assert_eq!(*err, ErrorKind::RemoteRetrievalFailed("tarballs".to_string()));
        assert!(!fetcher.cache().has(Category::Tarballs));
        assert!(fetcher.cache().entries().unwrap().is_empty());
    }

    #[test]
    fn cache_write_failure_aborts() {
        let remote = Arc::new(MockRemote::with_documents([("tarballs", "REMOTE")]));
        let (_temp, fetcher) = fetcher(&remote, false);
        // A directory where the document should go cannot be overwritten.
        std::fs::create_dir_all(fetcher.cache().resolve(Category::Tarballs)).unwrap();

        let err = fetcher.fetch(Category::Tarballs).unwrap_err();
        assert_eq!(*err, ErrorKind::Cache);
        assert_eq!(remote.call_count("tarballs"), 1);
    }

    #[test]
    fn project_pages_are_cached_per_project() {
        let remote = Arc::new(MockRemote::with_documents([("tarballs/Libc", "LIBC"), ("tarballs/xnu", "XNU")]));
        let (_temp, fetcher) = fetcher(&remote, false);

        assert_eq!(fetcher.fetch_project(Category::Tarballs, "Libc").unwrap(), b"LIBC");
        assert_eq!(fetcher.fetch_project(Category::Tarballs, "xnu").unwrap(), b"XNU");
        assert_eq!(fetcher.fetch_project(Category::Tarballs, "Libc").unwrap(), b"LIBC");
        assert_eq!(remote.call_count("tarballs/Libc"), 1);
        assert!(fetcher.cache().resolve(CacheKey::project(Category::Tarballs, "xnu").unwrap()).is_file());
    }

    #[test]
    fn project_names_cannot_escape_cache() {
        let remote = Arc::new(MockRemote::default());
        let (_temp, fetcher) = fetcher(&remote, false);

        let err = fetcher.fetch_project(Category::Tarballs, "../etc").unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidProject("../etc".to_string()));
        assert!(remote.calls().is_empty());
    }
}
