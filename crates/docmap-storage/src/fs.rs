//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading manifest-referenced documents from a
//! local content directory.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use crate::storage::{HEADER_DELIMITER, Storage, StorageError, StorageErrorKind, is_header_close};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Resolves source paths against a content root. Paths that would escape
/// the root are rejected with [`StorageErrorKind::InvalidPath`].
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use docmap_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("content"));
/// let header = storage.read_header("index.md")?;
/// # Ok::<(), docmap_storage::StorageError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Validate that a path doesn't escape the source directory.
    ///
    /// Rejects absolute paths and parent directory components (`..`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Map a source path to an absolute file path.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.strip_prefix("./").unwrap_or(path));
        Self::validate_path(relative)?;
        Ok(self.source_dir.join(relative))
    }

    fn io_error(err: std::io::Error, path: &str) -> StorageError {
        StorageError::io(err, Some(PathBuf::from(path))).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        let file_path = self.resolve(path)?;
        tracing::debug!(path, "Reading document");
        fs::read_to_string(&file_path).map_err(|e| Self::io_error(e, path))
    }

    fn read_header(&self, path: &str) -> Result<String, StorageError> {
        let file_path = self.resolve(path)?;
        let file = fs::File::open(&file_path).map_err(|e| Self::io_error(e, path))?;
        let mut reader = BufReader::new(file);

        let mut header = String::new();
        let read = reader
            .read_line(&mut header)
            .map_err(|e| Self::io_error(e, path))?;
        if read == 0 || header.trim_end() != HEADER_DELIMITER {
            return Ok(String::new());
        }

        let mut line = String::new();
        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| Self::io_error(e, path))?;
            if read == 0 {
                // Unclosed header, the caller reports it as malformed.
                break;
            }
            header.push_str(&line);
            if is_header_close(&line) {
                break;
            }
        }

        tracing::debug!(path, bytes = header.len(), "Read document header");
        Ok(header)
    }
}
