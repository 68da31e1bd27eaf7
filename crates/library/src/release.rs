//! Release discovery and download for a single project.
//!
//! Versions can be read from a project's tarballs page (archives) or its
//! source page (one directory per version). Downloads are tarballs only.
//! Project pages go through the cache like any other index document;
//! downloaded archives never do.

use aos_index::models::{Category, Release};
use exn::{OptionExt, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::fetch::IndexFetcher;
use crate::list::{join_lines, parse_document};

/// Every release listed on a project's page in `category`, in document order.
#[instrument(skip(fetcher))]
pub fn versions(fetcher: &IndexFetcher, category: Category, project: &str) -> Result<Vec<Release>> {
    let document = fetcher.fetch_project(category, project)?;
    let releases = parse_document(&document)?.releases(category, project);
    tracing::debug!(releases = releases.len(), "found releases");
    Ok(releases)
}

/// Versions joined one per line, without a trailing newline.
pub fn render_versions(releases: &[Release]) -> String {
    join_lines(releases.iter().map(|release| release.version.as_str()))
}

/// Downloads one release tarball into `dest_dir`, returning the written path.
///
/// An existing file with the same name is replaced.
#[instrument(skip(fetcher, dest_dir), fields(dest_dir = %dest_dir.display()))]
pub fn fetch_release(fetcher: &IndexFetcher, project: &str, version: &str, dest_dir: &Path) -> Result<PathBuf> {
    let release = versions(fetcher, Category::Tarballs, project)?
        .into_iter()
        .find(|release| release.version == version)
        .ok_or_raise(|| ErrorKind::ReleaseNotFound {
            project: project.to_string(),
            version: version.to_string(),
        })?;
    // File names come from the remote listing and must stay inside dest_dir.
    if Path::new(&release.file).file_name().and_then(|name| name.to_str()) != Some(release.file.as_str()) {
        exn::bail!(ErrorKind::ReleaseNotFound {
            project: project.to_string(),
            version: version.to_string(),
        });
    }

    let data = fetcher
        .remote()
        .download(Category::Tarballs.as_str(), project, &release.file)
        .or_raise(|| ErrorKind::RemoteRetrievalFailed(release.file.clone()))?;

    fs::create_dir_all(dest_dir).or_raise(|| ErrorKind::Io(dest_dir.to_path_buf()))?;
    let path = dest_dir.join(&release.file);
    fs::write(&path, &data).or_raise(|| ErrorKind::Io(path.clone()))?;
    tracing::info!(
        path = %path.display(),
        size = data.len(),
        hash = %blake3::hash(&data),
        "downloaded release",
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aos_cache::CacheStore;
    use aos_remote::MockRemote;
    use std::sync::Arc;

    const LIBC_PAGE: &str = r#"<html><body><pre>
<a href="../">Parent Directory</a>
<a href="Libc-825.40.1.tar.gz">Libc-825.40.1.tar.gz</a>
<a href="Libc-1439.40.11.tar.gz">Libc-1439.40.11.tar.gz</a>
<a href="Libcache-1.tar.gz">Libcache-1.tar.gz</a>
</pre></body></html>"#;

    const XNU_SOURCE_PAGE: &str = r#"<html><body><pre>
<a href="/source/">Parent Directory</a>
<a href="xnu-792/">xnu-792/</a>                       2017-09-26 17:12
<a href="xnu-4570.1.46/">xnu-4570.1.46/</a>                 2017-09-26 17:12
<a href="xnu-10002.81.5-development/">xnu-10002.81.5-dev..&gt;</a> 2024-02-01 09:30
</pre></body></html>"#;

    fn fetcher(remote: MockRemote) -> (tempfile::TempDir, Arc<MockRemote>, IndexFetcher) {
        let temp = tempfile::tempdir().unwrap();
        let remote = Arc::new(remote);
        let fetcher = IndexFetcher::new(CacheStore::new(temp.path().join("cache"), false), remote.clone());
        (temp, remote, fetcher)
    }

    #[test]
    fn lists_versions_in_order() {
        let (_temp, remote, fetcher) = fetcher(MockRemote::with_documents([("tarballs/Libc", LIBC_PAGE)]));
        let releases = versions(&fetcher, Category::Tarballs, "Libc").unwrap();
        assert_eq!(render_versions(&releases), "825.40.1\n1439.40.11");

        // The project page is cached.
        versions(&fetcher, Category::Tarballs, "Libc").unwrap();
        assert_eq!(remote.call_count("tarballs/Libc"), 1);
    }

    #[test]
    fn lists_source_tree_versions() {
        let (_temp, remote, fetcher) = fetcher(MockRemote::with_documents([("source/xnu", XNU_SOURCE_PAGE)]));
        let releases = versions(&fetcher, Category::Source, "xnu").unwrap();
        assert_eq!(render_versions(&releases), "792\n4570.1.46\n10002.81.5-development");
        assert!(releases.iter().all(|release| release.category == Category::Source));
        assert_eq!(remote.calls(), vec!["source/xnu"]);

        let cached: Vec<_> = fetcher.cache().entries().unwrap().into_iter().map(|f| f.key.to_string()).collect();
        assert_eq!(cached, vec!["source/xnu.html"]);
    }

    #[test]
    fn downloads_release() {
        let (temp, remote, fetcher) = fetcher(MockRemote::with_documents([
            ("tarballs/Libc", LIBC_PAGE.as_bytes()),
            ("tarballs/Libc/Libc-1439.40.11.tar.gz", b"\x1f\x8b tarball".as_slice()),
        ]));
        let dest = temp.path().join("downloads");

        let path = fetch_release(&fetcher, "Libc", "1439.40.11", &dest).unwrap();
        assert_eq!(path, dest.join("Libc-1439.40.11.tar.gz"));
        assert_eq!(fs::read(&path).unwrap(), b"\x1f\x8b tarball");
        assert_eq!(remote.call_count("tarballs/Libc/Libc-1439.40.11.tar.gz"), 1);

        // Downloads are not cached.
        let cached: Vec<_> = fetcher.cache().entries().unwrap().into_iter().map(|f| f.key.to_string()).collect();
        assert_eq!(cached, vec!["tarballs/Libc.html"]);
    }

    #[test]
    fn unknown_version() {
        let (temp, remote, fetcher) = fetcher(MockRemote::with_documents([("tarballs/Libc", LIBC_PAGE)]));
        let err = fetch_release(&fetcher, "Libc", "9.9", temp.path()).unwrap_err();
        assert_eq!(
            *err,
            ErrorKind::ReleaseNotFound { project: "Libc".to_string(), version: "9.9".to_string() }
        );
        assert_eq!(remote.calls(), vec!["tarballs/Libc"]);
    }

    #[test]
    fn failed_download_writes_nothing() {
        let (temp, _remote, fetcher) = fetcher(MockRemote::with_documents([("tarballs/Libc", LIBC_PAGE)]));
        let dest = temp.path().join("downloads");
        let err = fetch_release(&fetcher, "Libc", "825.40.1", &dest).unwrap_err();
        assert_eq!(*err, ErrorKind::RemoteRetrievalFailed("Libc-825.40.1.tar.gz".to_string()));
        assert!(!dest.exists());
    }
}
