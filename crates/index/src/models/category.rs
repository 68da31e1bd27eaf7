use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, ErrorKind};

/// Which remote catalog index is being addressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Release tarballs, one directory per project.
    #[default]
    Tarballs,
    /// Browsable source trees, one directory per project release.
    Source,
}
impl Category {
    /// Canonical name, used both as the cache key and as the remote path
    /// fragment.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Tarballs => "tarballs",
            Category::Source => "source",
        }
    }

    /// Picks the category requested by a pair of command-line switches.
    ///
    /// Source wins when it is requested; anything else (including neither
    /// switch) resolves to [`Tarballs`](Self::Tarballs).
    ///
    /// # Examples
    ///
    /// ```
    /// use aos_index::models::Category;
    /// assert_eq!(Category::select(false, false), Category::Tarballs);
    /// assert_eq!(Category::select(true, false), Category::Tarballs);
    /// assert_eq!(Category::select(false, true), Category::Source);
    /// ```
    pub fn select(tarballs: bool, source: bool) -> Self {
        match (tarballs, source) {
            (_, true) => Category::Source,
            (true, false) | (false, false) => Category::Tarballs,
        }
    }
}
impl FromStr for Category {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "tarballs" | "tarball" => Self::Tarballs,
            "source" => Self::Source,
            _ => exn::bail!(ErrorKind::UnknownCategory(s.to_string())),
        })
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
