use crate::consts;
use crate::models::{Category, ProjectEntry};

/// A versioned release of a project: a tarball, or a source tree directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Release {
    pub project: String,
    /// Everything between `<project>-` and the archive extension, or the end
    /// of the directory name for source trees.
    pub version: String,
    /// Name as listed, e.g. `Libc-1439.40.11.tar.gz` or `xnu-4570.1.46`.
    pub file: String,
    pub href: Option<String>,
    /// Where the release was listed; tarballs are files, source trees are
    /// directories.
    pub category: Category,
}
impl Release {
    /// Interprets an entry of a project page in `category` as a release of
    /// `project`.
    ///
    /// Tarballs pages list archives; source pages list one directory per
    /// version. Returns `None` for anything else, and for releases of a
    /// different project (`Libc` must not claim `Libcache-1.0.tar.gz`).
    ///
    /// # Examples
    ///
    /// ```
    /// use aos_index::models::{Category, ProjectEntry, Release};
    /// let entry = ProjectEntry::new("Libc-1439.40.11.tar.gz");
    /// let release = Release::from_entry(Category::Tarballs, "Libc", &entry).unwrap();
    /// assert_eq!(release.version, "1439.40.11");
    /// assert!(Release::from_entry(Category::Tarballs, "Libc", &ProjectEntry::new("README")).is_none());
    ///
    /// let entry = ProjectEntry::new("xnu-4570.1.46").with_href("xnu-4570.1.46/");
    /// let release = Release::from_entry(Category::Source, "xnu", &entry).unwrap();
    /// assert_eq!(release.version, "4570.1.46");
    /// ```
    pub fn from_entry(category: Category, project: &str, entry: &ProjectEntry) -> Option<Self> {
        let stem = match category {
            Category::Tarballs => consts::ARCHIVE_REGEX.captures(&entry.name)?.get(1)?.as_str(),
            Category::Source if entry.is_directory() => entry.name.as_str(),
            Category::Source => return None,
        };
        let version = stem.strip_prefix(project)?.strip_prefix('-')?;
        if version.is_empty() {
            return None;
        }
        Some(Self {
            project: project.to_string(),
            version: version.to_string(),
            file: entry.name.clone(),
            href: entry.href.clone(),
            category,
        })
    }
}
