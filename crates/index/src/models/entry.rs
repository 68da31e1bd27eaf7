use std::ops::Deref;

/// One catalog item found in an index document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectEntry {
    /// Display name, used as the lookup key for per-project operations.
    pub name: String,
    /// Link target relative to the index document.
    pub href: Option<String>,
}
impl ProjectEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), href: None }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Whether the entry links to a sub-listing rather than a file.
    pub fn is_directory(&self) -> bool {
        self.href
            .as_deref()
            .and_then(|href| href.split(['?', '#']).next())
            .is_some_and(|path| path.ends_with('/'))
    }
}

/// Entries of one index document, in document order.
///
/// Duplicates are preserved; the listing mirrors the document, it does not
/// interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListing(Vec<ProjectEntry>);
impl ProjectListing {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|entry| entry.name.as_str())
    }

    /// Looks up the first entry with exactly this name.
    pub fn get(&self, name: &str) -> Option<&ProjectEntry> {
        self.0.iter().find(|entry| entry.name == name)
    }

    pub fn into_inner(self) -> Vec<ProjectEntry> {
        self.0
    }
}
impl Deref for ProjectListing {
    type Target = [ProjectEntry];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<Vec<ProjectEntry>> for ProjectListing {
    fn from(entries: Vec<ProjectEntry>) -> Self {
        Self(entries)
    }
}
impl FromIterator<ProjectEntry> for ProjectListing {
    fn from_iter<T: IntoIterator<Item = ProjectEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl IntoIterator for ProjectListing {
    type Item = ProjectEntry;
    type IntoIter = std::vec::IntoIter<ProjectEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_keep_order_and_duplicates() {
        let listing: ProjectListing = ["B", "A", "B"].into_iter().map(ProjectEntry::new).collect();
        assert_eq!(listing.names().collect::<Vec<_>>(), vec!["B", "A", "B"]);
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn get_returns_first_match() {
        let listing = ProjectListing::from(vec![
            ProjectEntry::new("Libc").with_href("Libc/"),
            ProjectEntry::new("Libc").with_href("Libc-old/"),
        ]);
        assert_eq!(listing.get("Libc").and_then(|e| e.href.as_deref()), Some("Libc/"));
        assert!(listing.get("libc").is_none());
    }

    #[test]
    fn directories_are_recognised_by_href() {
        assert!(ProjectEntry::new("xnu-792").with_href("xnu-792/").is_directory());
        assert!(ProjectEntry::new("xnu-792").with_href("xnu-792/?C=M").is_directory());
        assert!(!ProjectEntry::new("xnu-792.tar.gz").with_href("xnu-792.tar.gz").is_directory());
        assert!(!ProjectEntry::new("xnu-792").is_directory());
    }
}
