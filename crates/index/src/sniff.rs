//! Cheap checks deciding whether bytes can be an index document at all.

use memchr::memchr;

use crate::error::{ErrorKind, Result};

/// Only the head of the document is inspected for binary content.
pub const SNIFF_SIZE_BYTES: usize = 1024;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Draws the line between "malformed" and "an index with no entries".
///
/// A document is malformed when it:
/// - is empty or only whitespace,
/// - contains a NUL byte within the first [`SNIFF_SIZE_BYTES`] (binary data), or
/// - does not start with markup (first non-whitespace character after an
///   optional UTF-8 BOM is not `<`).
///
/// Everything else is handed to the HTML parser, which is lenient enough to
/// turn any markup into a tree; a tree without entries is an empty listing.
///
/// # Examples
///
/// ```rust
/// use aos_index::is_index;
/// assert!(is_index(b"<html><body></body></html>"));
/// assert!(!is_index(b""));
/// assert!(!is_index(b"just some words"));
/// ```
pub fn check(html: &[u8]) -> Result<()> {
    let head = &html[..html.len().min(SNIFF_SIZE_BYTES)];
    if memchr(0, head).is_some() {
        exn::bail!(ErrorKind::MalformedDocument("binary data"));
    }
    let body = html.strip_prefix(UTF8_BOM).unwrap_or(html);
    match body.iter().find(|byte| !byte.is_ascii_whitespace()) {
        None => exn::bail!(ErrorKind::MalformedDocument("empty document")),
        Some(b'<') => Ok(()),
        Some(_) => exn::bail!(ErrorKind::MalformedDocument("not a markup document")),
    }
}
