//! Warm site state.
//!
//! [`SiteState`] is built once per manifest and never mutated afterwards, so
//! a single instance can be shared across threads resolving pages in
//! parallel. Building it reads the manifest and every document header;
//! resolving a page reads only that page's document.

use std::sync::Arc;

use docmap_storage::Storage;

use crate::content::load_page;
use crate::error::SiteError;
use crate::links::{LinkKind, LinkStyle};
use crate::manifest::{Manifest, load_manifest};
use crate::navigation::{NavItem, assemble, load_titles};
use crate::page::{BreadcrumbItem, Page};
use crate::route_index::RouteIndex;
use crate::route_tree::RouteTree;
use crate::site::SiteConfig;
use crate::static_paths::{StaticPath, enumerate};

/// Resolved manifest, route index and navigation for one content snapshot.
pub struct SiteState {
    storage: Arc<dyn Storage>,
    manifest: Manifest,
    tree: RouteTree,
    index: RouteIndex,
    titles: Vec<String>,
    navigation: Vec<NavItem>,
    links: LinkStyle,
}

impl SiteState {
    /// Load the manifest and derive everything pages share.
    ///
    /// # Errors
    ///
    /// Returns manifest errors, [`SiteError::RouteCollision`], and the first
    /// document error hit while reading navigation titles.
    pub fn warm_up(storage: Arc<dyn Storage>, config: &SiteConfig) -> Result<Self, SiteError> {
        let manifest = load_manifest(storage.as_ref(), &config.manifest_path)?;
        let tree = RouteTree::from_manifest(&manifest, config.addressing);
        let index = RouteIndex::from_tree(&tree)?;
        let titles = load_titles(&tree, storage.as_ref())?;
        let navigation = assemble(&tree, &titles);

        tracing::info!(
            pages = index.len(),
            version = manifest.current_version(),
            "Site state ready"
        );

        Ok(Self {
            storage,
            manifest,
            tree,
            index,
            titles,
            navigation,
            links: config.links,
        })
    }

    /// Parsed manifest.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Route index.
    #[must_use]
    pub fn index(&self) -> &RouteIndex {
        &self.index
    }

    /// Navigation tree.
    #[must_use]
    pub fn navigation(&self) -> &[NavItem] {
        &self.navigation
    }

    /// Current content version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.manifest.current_version()
    }

    /// Every pre-renderable page, in manifest declaration order.
    #[must_use]
    pub fn static_paths(&self) -> Vec<StaticPath> {
        enumerate(&self.index)
    }

    /// Breadcrumbs for a URL path, root first, current page excluded.
    ///
    /// Unknown paths have no breadcrumbs.
    #[must_use]
    pub fn breadcrumbs(&self, url_path: &str) -> Vec<BreadcrumbItem> {
        let Some(idx) = self.index.position(url_path) else {
            return Vec::new();
        };
        self.tree
            .ancestors(idx)
            .into_iter()
            .map(|i| BreadcrumbItem {
                title: self.titles[i].clone(),
                path: self.tree.node(i).url_path.clone(),
            })
            .collect()
    }

    /// Resolve URL path segments to a page.
    ///
    /// `[]` and `[""]` both address the root page.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::PageNotFound`] for URL paths outside the index and
    /// document errors from the content loader.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<Page, SiteError> {
        let url_path = segments
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        self.resolve_path(&url_path)
    }

    /// Resolve a URL path to a page.
    ///
    /// # Errors
    ///
    /// Same as [`SiteState::resolve`].
    pub fn resolve_path(&self, url_path: &str) -> Result<Page, SiteError> {
        let url_path = url_path.trim_matches('/');
        let source_path = self
            .index
            .get(url_path)
            .ok_or_else(|| SiteError::PageNotFound(url_path.to_owned()))?;

        let document = load_page(self.storage.as_ref(), source_path, url_path, self.links)?;

        for link in &document.links {
            if let LinkKind::Page { url_path: target } = &link.kind
                && !self.index.contains(target)
            {
                tracing::warn!(page = %url_path, link = %link.original, "Link to a page outside the manifest");
            }
        }

        tracing::debug!(url_path, source_path, "Resolved page");

        Ok(Page {
            url_path: url_path.to_owned(),
            content: document.body,
            attributes: document.front_matter,
            navigation: self.navigation.clone(),
            version: self.version().to_owned(),
            breadcrumbs: self.breadcrumbs(url_path),
            headings: document.headings,
            links: document.links,
        })
    }
}
