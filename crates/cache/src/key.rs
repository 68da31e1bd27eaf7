//! Cache keys and path validation.
//!
//! A key is a relative path below the cache root. Category keys are derived
//! from the category's canonical name and cannot fail; keys built from
//! remote-provided project names are validated so they never escape the root.

use aos_index::models::Category;
use std::ffi::OsStr;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Extension of every cached index document.
pub(crate) const HTML_EXTENSION: &str = "html";

/// Relative location of one cached document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey(PathBuf);
impl CacheKey {
    /// Validates an arbitrary relative path as a key.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self(validate(path)?))
    }

    /// Key of a per-project index page: `<category>/<project>.html`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aos_cache::CacheKey;
    /// use aos_index::models::Category;
    /// let key = CacheKey::project(Category::Tarballs, "Libc").unwrap();
    /// assert_eq!(key.as_path(), std::path::Path::new("tarballs/Libc.html"));
    /// assert!(CacheKey::project(Category::Tarballs, "../Libc").is_err());
    /// ```
    pub fn project(category: Category, project: &str) -> Result<Self> {
        let segment = Path::new(project);
        let mut components = segment.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == OsStr::new(project) => {},
            _ => exn::bail!(ErrorKind::InvalidKey(segment.to_path_buf())),
        }
        Self::new(Path::new(category.as_str()).join(format!("{project}.{HTML_EXTENSION}")))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}
impl From<Category> for CacheKey {
    fn from(category: Category) -> Self {
        Self(PathBuf::from(format!("{}.{HTML_EXTENSION}", category.as_str())))
    }
}
impl AsRef<Path> for CacheKey {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.display())
    }
}

/// Returns `true` if a path names a cached document (`.html` extension).
pub(crate) fn is_html_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(HTML_EXTENSION))
}

/// Accepts a key only if every component is a plain file or directory name.
/// `..`, `.` and roots are rejected, not resolved. NUL bytes are rejected as
/// they truncate the path at the syscall boundary.
pub(crate) fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let plain = |component: Component<'_>| {
        matches!(component, Component::Normal(name) if !name.as_encoded_bytes().contains(&0))
    };
    match path.components().next().is_some() && path.components().all(plain) {
        true => Ok(path.components().collect()),
        false => exn::bail!(ErrorKind::InvalidKey(path.to_path_buf())),
    }
}
