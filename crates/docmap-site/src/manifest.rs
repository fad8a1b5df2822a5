//! Content manifest model and loading.
//!
//! The manifest is a JSON document listing the available content versions
//! and the route tree:
//!
//! ```json
//! {
//!     "versions": ["v2", "v1"],
//!     "routes": [
//!         {"path": "index.md", "children": [{"path": "guides/deploy.md"}]}
//!     ]
//! }
//! ```

use std::path::PathBuf;

use docmap_storage::{Storage, StorageErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// One content snapshot: available versions and the route tree.
///
/// Immutable for the lifetime of a build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Version identifiers, the first one is current.
    pub versions: Vec<String>,
    /// Top-level routes in navigation order.
    pub routes: Vec<Route>,
}

/// Node of the content tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Route {
    /// Document location relative to the content root.
    #[serde(rename = "path")]
    pub source_path: String,
    /// Nested sections in navigation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Route>,
}

impl Route {
    /// Create a leaf route.
    #[must_use]
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            children: Vec::new(),
        }
    }

    /// Attach children to the route.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

impl Manifest {
    /// Parse and validate a manifest document.
    ///
    /// `path` is only used for error context.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::ManifestParse`] for invalid JSON, unexpected
    /// fields, an empty version list or a route with an empty path.
    pub fn from_json(text: &str, path: impl Into<PathBuf>) -> Result<Self, SiteError> {
        let path = path.into();
        let manifest: Self = serde_json::from_str(text).map_err(|e| SiteError::ManifestParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        manifest.validate(&path)?;
        Ok(manifest)
    }

    /// Current version (first declared).
    #[must_use]
    pub fn current_version(&self) -> &str {
        self.versions.first().map_or("", String::as_str)
    }

    /// Total number of routes at every depth.
    #[must_use]
    pub fn route_count(&self) -> usize {
        fn count(routes: &[Route]) -> usize {
            routes.iter().map(|r| 1 + count(&r.children)).sum()
        }
        count(&self.routes)
    }

    fn validate(&self, path: &std::path::Path) -> Result<(), SiteError> {
        let invalid = |message: &str| SiteError::ManifestParse {
            path: path.to_path_buf(),
            message: message.to_owned(),
        };

        if self.versions.is_empty() {
            return Err(invalid("versions must list at least one version"));
        }
        if self.versions.iter().any(String::is_empty) {
            return Err(invalid("versions must not contain empty identifiers"));
        }

        let mut stack: Vec<&Route> = self.routes.iter().collect();
        while let Some(route) = stack.pop() {
            if route.source_path.trim().is_empty() {
                return Err(invalid("route path cannot be empty"));
            }
            stack.extend(&route.children);
        }

        Ok(())
    }
}

/// Load the manifest document from storage.
///
/// # Errors
///
/// Returns [`SiteError::ManifestNotFound`] if the document is absent,
/// [`SiteError::ManifestParse`] if it is not a valid manifest, and
/// [`SiteError::Storage`] for other read failures.
pub fn load_manifest(storage: &dyn Storage, manifest_path: &str) -> Result<Manifest, SiteError> {
    let text = storage.read(manifest_path).map_err(|e| match e.kind() {
        StorageErrorKind::NotFound => SiteError::ManifestNotFound(PathBuf::from(manifest_path)),
        _ => SiteError::Storage(e),
    })?;

    let manifest = Manifest::from_json(&text, manifest_path)?;
    tracing::debug!(
        path = manifest_path,
        routes = manifest.route_count(),
        versions = manifest.versions.len(),
        "Loaded manifest"
    );
    Ok(manifest)
}
