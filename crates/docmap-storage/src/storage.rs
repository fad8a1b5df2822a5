//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting document retrieval,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Source Path Convention
//!
//! All path parameters in Storage methods are **source paths** exactly as
//! they appear in the content manifest, relative to the content root:
//! - `"index.md"` - root document
//! - `"./guides/index.md"` - leading `./` is accepted
//! - `"guides/deploy.md"` - nested document

use std::path::PathBuf;

/// Line that opens (and by default closes) a front matter header.
pub const HEADER_DELIMITER: &str = "---";

/// Alternative YAML document end marker accepted as a closing line.
pub(crate) const HEADER_END_MARKER: &str = "...";

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path escapes the content root or is otherwise unusable.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Error kind.
    #[must_use]
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for source document retrieval.
///
/// Documents are read-only for the lifetime of a build, so implementations
/// must be safe to share across threads resolving pages concurrently.
pub trait Storage: Send + Sync {
    /// Read the full text of a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Read only the front matter header of a document.
    ///
    /// Returns the text from the opening delimiter up to and including the
    /// closing delimiter line, or an empty string if the document has no
    /// header. When the header is never closed the whole text is returned so
    /// the caller can report it as malformed.
    ///
    /// The default implementation reads the whole document. Backends that can
    /// stream should stop at the closing delimiter instead.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read_header(&self, path: &str) -> Result<String, StorageError> {
        let text = self.read(path)?;
        Ok(header_prefix(&text).to_owned())
    }
}

/// Whether `line` closes a front matter header.
#[must_use]
pub fn is_header_close(line: &str) -> bool {
    let line = line.trim_end();
    line == HEADER_DELIMITER || line == HEADER_END_MARKER
}

/// Slice of `text` covering its front matter header, delimiters included.
///
/// See [`Storage::read_header`] for the exact contract.
#[must_use]
pub(crate) fn header_prefix(text: &str) -> &str {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return "";
    };
    if first.trim_end() != HEADER_DELIMITER {
        return "";
    }

    let mut end = first.len();
    for line in lines {
        end += line.len();
        if is_header_close(line) {
            return &text[..end];
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_prefix_without_header() {
        assert_eq!(header_prefix("# Title\n\nBody"), "");
    }

    #[test]
    fn test_header_prefix_empty_text() {
        assert_eq!(header_prefix(""), "");
    }

    #[test]
    fn test_header_prefix_stops_at_closing_delimiter() {
        let text = "---\ntitle: Home\n---\n# Body\n";
        assert_eq!(header_prefix(text), "---\ntitle: Home\n---\n");
    }

    #[test]
    fn test_header_prefix_accepts_document_end_marker() {
        let text = "---\ntitle: Home\n...\nBody";
        assert_eq!(header_prefix(text), "---\ntitle: Home\n...\n");
    }

    #[test]
    fn test_header_prefix_handles_crlf() {
        let text = "---\r\ntitle: Home\r\n---\r\nBody";
        assert_eq!(header_prefix(text), "---\r\ntitle: Home\r\n---\r\n");
    }

    #[test]
    fn test_header_prefix_unclosed_returns_everything() {
        let text = "---\ntitle: Home\nBody";
        assert_eq!(header_prefix(text), text);
    }

    #[test]
    fn test_error_display_with_backend_and_path() {
        let err = StorageError::not_found("guides/deploy.md").with_backend("Fs");
        assert_eq!(err.to_string(), "[Fs] Not found (path: guides/deploy.md)");
    }

    #[test]
    fn test_error_from_io_maps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::io(io, Some(PathBuf::from("a.md")));
        assert_eq!(err.kind(), &StorageErrorKind::PermissionDenied);
        assert_eq!(err.path(), Some(std::path::Path::new("a.md")));
        assert!(std::error::Error::source(&err).is_some());
    }
}
