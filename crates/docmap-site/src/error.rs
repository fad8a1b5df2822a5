//! Error types for manifest resolution and page loading.

use std::path::PathBuf;

use docmap_storage::{StorageError, StorageErrorKind};

/// Error returned when building the site or resolving a page fails.
///
/// Every variant is fatal for a build: inputs are static local files, so a
/// retry cannot change the outcome.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Manifest document does not exist.
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),
    /// Manifest document is not a valid manifest.
    #[error("Invalid manifest {}: {message}", .path.display())]
    ManifestParse {
        /// Manifest location.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Two routes normalize to the same URL path.
    #[error("Route collision at URL path \"{url_path}\": {first} and {second}")]
    RouteCollision {
        /// Colliding URL path.
        url_path: String,
        /// Source path that claimed the URL first.
        first: String,
        /// Source path that collided with it.
        second: String,
    },
    /// Referenced source document does not exist.
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Front matter header is malformed.
    #[error("Invalid front matter in {}: {message}", .path.display())]
    FrontMatterParse {
        /// Source document.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Front matter has no title.
    #[error("Front matter in {} has no title", .0.display())]
    FrontMatterMissingTitle(PathBuf),
    /// URL path is not part of the route index.
    #[error("Page not found: \"{0}\"")]
    PageNotFound(String),
    /// Storage failure other than a missing document.
    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),
}

impl SiteError {
    /// Convert a storage error raised while reading a source document.
    pub(crate) fn from_source_read(err: StorageError, source_path: &str) -> Self {
        match err.kind() {
            StorageErrorKind::NotFound => Self::SourceNotFound(PathBuf::from(source_path)),
            _ => Self::Storage(err),
        }
    }
}
