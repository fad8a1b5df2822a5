//! URL path to source path index.
//!
//! Keys keep the manifest's pre-order declaration order, which is also the
//! order in which static paths are enumerated.

use std::collections::HashMap;

use crate::error::SiteError;
use crate::manifest::Manifest;
use crate::route_tree::{AddressingMode, RouteTree};

/// Bijective mapping from URL paths to source paths.
#[derive(Clone, Debug, Default)]
pub struct RouteIndex {
    entries: Vec<(String, String)>,
    lookup: HashMap<String, usize>,
}

impl RouteIndex {
    /// Build the index from a resolved route tree.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::RouteCollision`] when two routes normalize to the
    /// same URL path.
    pub fn from_tree(tree: &RouteTree) -> Result<Self, SiteError> {
        let mut entries = Vec::with_capacity(tree.len());
        let mut lookup = HashMap::with_capacity(tree.len());

        for node in tree.nodes() {
            if let Some(&existing) = lookup.get(&node.url_path) {
                let (_, first): &(String, String) = &entries[existing];
                return Err(SiteError::RouteCollision {
                    url_path: node.url_path.clone(),
                    first: first.clone(),
                    second: node.source_path.clone(),
                });
            }
            lookup.insert(node.url_path.clone(), entries.len());
            entries.push((node.url_path.clone(), node.source_path.clone()));
        }

        Ok(Self { entries, lookup })
    }

    /// Source path for a URL path.
    #[must_use]
    pub fn get(&self, url_path: &str) -> Option<&str> {
        self.lookup
            .get(url_path)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Declaration position of a URL path.
    ///
    /// Matches the node index of the [`RouteTree`] the index was built from.
    #[must_use]
    pub fn position(&self, url_path: &str) -> Option<usize> {
        self.lookup.get(url_path).copied()
    }

    /// Whether the URL path is indexed.
    #[must_use]
    pub fn contains(&self, url_path: &str) -> bool {
        self.lookup.contains_key(url_path)
    }

    /// URL paths in declaration order.
    pub fn url_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(url, _)| url.as_str())
    }

    /// `(url_path, source_path)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(url, source)| (url.as_str(), source.as_str()))
    }

    /// Number of indexed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the route index for a manifest.
///
/// # Errors
///
/// Returns [`SiteError::RouteCollision`] naming the colliding URL path.
pub fn build_index(manifest: &Manifest, mode: AddressingMode) -> Result<RouteIndex, SiteError> {
    RouteIndex::from_tree(&RouteTree::from_manifest(manifest, mode))
}
