//! Resolved route tree.
//!
//! The manifest's nested [`Route`] values are flattened into an arena:
//! nodes live in a `Vec` in pre-order, with parent/children relationships
//! tracked by indices. Both the route index and the navigation tree are
//! derived from this structure, so they always agree on URL paths.

use crate::manifest::{Manifest, Route};
use crate::normalize::normalize;

/// How URL paths of nested routes are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressingMode {
    /// Every route's source path is relative to the content root and
    /// already encodes its nesting.
    #[default]
    Absolute,
    /// Child source paths are relative to the parent's URL path.
    Relative,
}

/// Route with its effective source path and URL path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteNode {
    /// Source path relative to the content root.
    pub source_path: String,
    /// Normalized URL path.
    pub url_path: String,
}

/// Flattened route tree in pre-order.
#[derive(Clone, Debug, Default)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
}

impl RouteTree {
    /// Resolve a manifest's routes under the given addressing mode.
    ///
    /// Nodes are visited depth-first, pre-order, siblings in manifest order.
    #[must_use]
    pub fn from_manifest(manifest: &Manifest, mode: AddressingMode) -> Self {
        let mut builder = RouteTreeBuilder::new();
        let mut stack: Vec<(&Route, Option<usize>)> =
            manifest.routes.iter().rev().map(|r| (r, None)).collect();

        while let Some((route, parent)) = stack.pop() {
            let parent_url = parent.map(|p| builder.nodes[p].url_path.as_str());
            let source_path = effective_source_path(&route.source_path, parent_url, mode);
            let url_path = normalize(&source_path);
            let idx = builder.add_node(source_path, url_path, parent);
            stack.extend(route.children.iter().rev().map(|c| (c, Some(idx))));
        }

        builder.build()
    }

    /// All nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    /// Node by index.
    #[must_use]
    pub fn node(&self, idx: usize) -> &RouteNode {
        &self.nodes[idx]
    }

    /// Child indices of a node, in manifest order.
    #[must_use]
    pub fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    /// Parent index of a node, `None` for top-level routes.
    #[must_use]
    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.parents[idx]
    }

    /// Top-level node indices, in manifest order.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ancestor indices of a node, root first, the node itself excluded.
    #[must_use]
    pub fn ancestors(&self, idx: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.parents[idx];
        while let Some(i) = current {
            chain.push(i);
            current = self.parents[i];
        }
        chain.reverse();
        chain
    }
}

/// Source path of a route once its parent is taken into account.
fn effective_source_path(local: &str, parent_url: Option<&str>, mode: AddressingMode) -> String {
    match (mode, parent_url) {
        (AddressingMode::Relative, Some(parent)) if !parent.is_empty() => {
            let local = local.strip_prefix("./").unwrap_or(local);
            format!("{parent}/{local}")
        }
        _ => local.to_owned(),
    }
}

/// Builder for constructing [`RouteTree`] instances.
struct RouteTreeBuilder {
    nodes: Vec<RouteNode>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
}

impl RouteTreeBuilder {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Add a node, returning its index.
    fn add_node(&mut self, source_path: String, url_path: String, parent: Option<usize>) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(RouteNode {
            source_path,
            url_path,
        });
        self.children.push(Vec::new());
        self.parents.push(parent);

        if let Some(parent) = parent {
            self.children[parent].push(idx);
        } else {
            self.roots.push(idx);
        }

        idx
    }

    fn build(self) -> RouteTree {
        RouteTree {
            nodes: self.nodes,
            children: self.children,
            parents: self.parents,
            roots: self.roots,
        }
    }
}
