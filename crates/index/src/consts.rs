use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Link text used by Apache-style listings for the "go up" row.
pub(crate) const PARENT_DIRECTORY: &str = "Parent Directory";

// Every link is a candidate; navigation is filtered out afterwards.
selector!(ENTRY_SELECTOR, "a[href]");
// Absolute links (`https://`, `mailto:`) never point at a catalog entry.
regex!(SCHEME_REGEX, r"^[A-Za-z][A-Za-z0-9+.\-]*:");
regex!(ARCHIVE_REGEX, r"^(.+)\.(?:tar\.gz|tgz|tar\.bz2|tar\.xz)$");
