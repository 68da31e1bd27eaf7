use crate::models::{Category, ProjectEntry, ProjectListing, Release};
use crate::source::EntrySource;

impl ProjectListing {
    /// Collects the catalog entries of a document, skipping navigation and
    /// nameless links. Document order is kept.
    pub fn from_source<S: EntrySource + ?Sized>(source: &S) -> Self {
        source
            .candidates()
            .filter(|candidate| candidate.is_entry())
            .map(|candidate| ProjectEntry { name: candidate.name, href: candidate.href })
            .collect()
    }

    /// Interprets this listing as a project page in `category` and returns
    /// its releases, in document order.
    pub fn releases(&self, category: Category, project: &str) -> Vec<Release> {
        self.iter().filter_map(|entry| Release::from_entry(category, project, entry)).collect()
    }
}
