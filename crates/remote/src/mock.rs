//! In-memory remote for testing.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::RemoteIndex;
use crate::error::{ErrorKind, Result};

/// In-memory [`RemoteIndex`] for testing.
///
/// Documents are keyed by their remote path: `"tarballs"` for a category
/// index, `"tarballs/Libc"` for a project page and
/// `"tarballs/Libc/Libc-1.0.tar.gz"` for a project file. Unknown paths answer
/// with an HTTP 404. Every call is recorded so tests can assert how often the
/// network would have been hit.
///
/// # Examples
///
/// ```
/// use aos_remote::{MockRemote, RemoteIndex};
///
/// let remote = MockRemote::with_documents([("tarballs", "<a href=\"Libc/\">Libc/</a>")]);
/// assert!(remote.index_project("tarballs").is_ok());
/// assert!(remote.index_project("source").is_err());
/// assert_eq!(remote.calls(), vec!["tarballs", "source"]);
/// ```
pub struct MockRemote {
    name: String,
    documents: Mutex<HashMap<String, Response>>,
    calls: Mutex<Vec<String>>,
}

#[derive(Clone)]
enum Response {
    Document(Vec<u8>),
    Status(u16),
}

impl MockRemote {
    /// Create a mock remote pre-populated with documents.
    pub fn with_documents(documents: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        let documents = documents
            .into_iter()
            .map(|(path, data)| (path.into(), Response::Document(data.into())))
            .collect();
        Self {
            name: "mock".to_string(),
            documents: Mutex::new(documents),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Change the name of the mock remote.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make a path answer with the given HTTP status instead of a document.
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        self.lock_documents().insert(path.into(), Response::Status(status));
        self
    }

    /// Replace (or add) the document served for a path.
    pub fn set_document(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.lock_documents().insert(path.into(), Response::Document(data.into()));
    }

    /// Every requested path, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// How many times a path was requested.
    pub fn call_count(&self, path: &str) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).iter().filter(|p| *p == path).count()
    }

    fn lock_documents(&self) -> std::sync::MutexGuard<'_, HashMap<String, Response>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self, path: String) -> Result<Vec<u8>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(path.clone());
        let response = self.lock_documents().get(&path).cloned();
        match response {
            Some(Response::Document(data)) => Ok(data),
            Some(Response::Status(status)) => exn::bail!(ErrorKind::Status {
                url: format!("mock://{path}"),
                status,
            }),
            None => exn::bail!(ErrorKind::Status {
                url: format!("mock://{path}"),
                status: 404,
            }),
        }
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        let documents: [(&str, &str); 0] = [];
        Self::with_documents(documents)
    }
}

impl RemoteIndex for MockRemote {
    fn name(&self) -> &str {
        &self.name
    }

    fn index_project(&self, category: &str) -> Result<Vec<u8>> {
        self.get(category.to_string())
    }

    fn index_page(&self, category: &str, project: &str) -> Result<Vec<u8>> {
        self.get(format!("{category}/{project}"))
    }

    fn download(&self, category: &str, project: &str, file: &str) -> Result<Vec<u8>> {
        self.get(format!("{category}/{project}/{file}"))
    }
}
