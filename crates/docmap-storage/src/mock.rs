//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores documents in memory, keyed by source path with any leading `./`
/// removed. Counts full reads so tests can assert that header-only callers
/// never load document bodies.
///
/// # Example
///
/// ```
/// use docmap_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("index.md", "---\ntitle: Home\n---\nWelcome");
///
/// assert_eq!(storage.read_header("./index.md").unwrap(), "---\ntitle: Home\n---\n");
/// assert_eq!(storage.full_reads(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<HashMap<String, String>>,
    full_reads: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.files
            .write()
            .unwrap()
            .insert(Self::key(&path).to_owned(), content.into());
        self
    }

    /// Number of [`Storage::read`] calls served so far.
    #[must_use]
    pub fn full_reads(&self) -> usize {
        self.full_reads.load(Ordering::Relaxed)
    }

    fn key(path: &str) -> &str {
        path.strip_prefix("./").unwrap_or(path)
    }

    fn get(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(Self::key(path))
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.full_reads.fetch_add(1, Ordering::Relaxed);
        self.get(path)
    }

    fn read_header(&self, path: &str) -> Result<String, StorageError> {
        let text = self.get(path)?;
        Ok(crate::storage::header_prefix(&text).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageErrorKind;

    #[test]
    fn test_read_returns_content() {
        let storage = MockStorage::new().with_file("guide.md", "Guide");

        assert_eq!(storage.read("guide.md").unwrap(), "Guide");
        assert_eq!(storage.full_reads(), 1);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind(), &StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_dot_slash_prefix_is_ignored() {
        let storage = MockStorage::new().with_file("./a/index.md", "A");

        assert_eq!(storage.read("a/index.md").unwrap(), "A");
        assert_eq!(storage.read("./a/index.md").unwrap(), "A");
    }

    #[test]
    fn test_read_header_does_not_count_as_full_read() {
        let storage = MockStorage::new().with_file("a.md", "---\ntitle: A\n---\nBody");

        storage.read_header("a.md").unwrap();

        assert_eq!(storage.full_reads(), 0);
    }
}
