//! Candidate entries of an index document.
//!
//! The listing logic only needs to know, for every link-like thing in a
//! document, what it is called, where it points, and whether it is
//! navigation (sort headers, "Parent Directory", links to the site root or
//! other sites) rather than a catalog item. [`EntrySource`] is that seam;
//! [`HtmlIndex`] implements it for real HTML via [`scraper`].

use percent_encoding::percent_decode_str;
use scraper::Html;
use tracing::instrument;

use crate::error::Result;
use crate::{consts, sniff};

/// A link found in an index document, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Last path segment of the link target (percent-decoded, trailing `/`
    /// removed), or the trimmed link text when the target has no usable
    /// segment. Listings abbreviate long link texts but never the target.
    /// May be empty, in which case the candidate is not usable.
    pub name: String,
    pub href: Option<String>,
    /// `true` for links that navigate the listing instead of naming an entry.
    pub navigational: bool,
}
impl Candidate {
    /// Builds a candidate from raw link text and target, classifying it.
    ///
    /// # Examples
    ///
    /// ```
    /// use aos_index::Candidate;
    /// let entry = Candidate::from_link(" Libc/ ", Some("Libc/"));
    /// assert_eq!(entry.name, "Libc");
    /// assert!(!entry.navigational);
    ///
    /// assert!(Candidate::from_link("Parent Directory", Some("/")).navigational);
    /// assert!(Candidate::from_link("Name", Some("?C=N;O=D")).navigational);
    /// ```
    pub fn from_link(text: &str, href: Option<&str>) -> Self {
        let text = text.trim();
        let text = text.strip_suffix('/').unwrap_or(text);
        let href = href.map(str::trim);
        let navigational = is_navigational(text, href);
        let name = match navigational {
            true => None,
            false => href.and_then(last_segment),
        };
        Self {
            name: name.unwrap_or_else(|| text.to_string()),
            href: href.map(str::to_string),
            navigational,
        }
    }

    /// Whether this candidate names a catalog entry.
    pub fn is_entry(&self) -> bool {
        !self.navigational && !self.name.is_empty()
    }
}

fn is_navigational(name: &str, href: Option<&str>) -> bool {
    if name.eq_ignore_ascii_case(consts::PARENT_DIRECTORY) {
        return true;
    }
    let Some(href) = href.map(str::trim) else {
        return false;
    };
    href.starts_with(['?', '#'])
        || matches!(href, "/" | "." | "./" | "..")
        || href.starts_with("../")
        || href.starts_with("//")
        || consts::SCHEME_REGEX.is_match(href)
}

/// Final path segment of a link target, ignoring query and fragment.
fn last_segment(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let path = path.strip_suffix('/').unwrap_or(path);
    let segment = path.rsplit('/').next().unwrap_or_default();
    let segment = percent_decode_str(segment).decode_utf8_lossy();
    match segment.trim() {
        "" | "." | ".." => None,
        segment => Some(segment.to_string()),
    }
}

/// Anything that can enumerate the candidate entries of an index document.
pub trait EntrySource {
    /// Candidates in document order, navigation included.
    fn candidates(&self) -> impl Iterator<Item = Candidate> + '_;
}

impl EntrySource for [Candidate] {
    fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.iter().cloned()
    }
}

/// A parsed HTML directory listing.
pub struct HtmlIndex {
    document: Html,
}
impl HtmlIndex {
    /// Parses raw bytes into an HTML tree.
    ///
    /// Accepts raw bytes, instead of requiring HTML to be valid UTF-8.
    /// Invalid byte sequences are replaced with U+FFFD during parsing.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedDocument`](crate::error::ErrorKind::MalformedDocument)
    /// when the bytes are not markup at all (see [`is_index`](crate::is_index)).
    #[instrument(level = "trace", skip(html), fields(html_size = html.len()))]
    pub fn parse(html: &[u8]) -> Result<Self> {
        sniff::check(html)?;
        let html = String::from_utf8_lossy(html);
        Ok(Self { document: Html::parse_document(&html) })
    }
}
impl EntrySource for HtmlIndex {
    fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.document.select(&consts::ENTRY_SELECTOR).map(|anchor| {
            let text = anchor.text().collect::<String>();
            Candidate::from_link(&text, anchor.value().attr("href"))
        })
    }
}
