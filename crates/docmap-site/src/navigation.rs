//! Navigation tree building.
//!
//! The navigation tree mirrors the route tree one-to-one: same depth, same
//! child order. Titles come from each document's front matter, read through
//! [`Storage::read_header`] so document bodies are never loaded here.

use std::path::Path;

use docmap_storage::Storage;
use serde::Serialize;

use crate::error::SiteError;
use crate::front_matter::parse_front_matter;
use crate::route_tree::RouteTree;

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// URL path of the page.
    pub path: String,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Read the title of every route, indexed like the tree's nodes.
///
/// # Errors
///
/// Fails on the first document that is missing, has a malformed header, or
/// has no title.
pub(crate) fn load_titles(tree: &RouteTree, storage: &dyn Storage) -> Result<Vec<String>, SiteError> {
    tree.nodes()
        .iter()
        .map(|node| {
            let header = storage
                .read_header(&node.source_path)
                .map_err(|e| SiteError::from_source_read(e, &node.source_path))?;
            let front_matter = parse_front_matter(&header, Path::new(&node.source_path))?;
            tracing::debug!(url_path = %node.url_path, title = %front_matter.title, "Navigation entry");
            Ok(front_matter.title)
        })
        .collect()
}

/// Assemble navigation items from per-node titles.
///
/// Nodes are stored in pre-order, so every child index is greater than its
/// parent's. Walking indices backwards builds children before parents.
pub(crate) fn assemble(tree: &RouteTree, titles: &[String]) -> Vec<NavItem> {
    let mut built: Vec<Option<NavItem>> = vec![None; tree.len()];

    for idx in (0..tree.len()).rev() {
        let children = tree
            .children(idx)
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[idx] = Some(NavItem {
            title: titles[idx].clone(),
            path: tree.node(idx).url_path.clone(),
            children,
        });
    }

    tree.roots()
        .iter()
        .filter_map(|&root| built[root].take())
        .collect()
}

/// Build the navigation tree for a resolved route tree.
///
/// # Errors
///
/// Returns [`SiteError::SourceNotFound`], [`SiteError::FrontMatterParse`] or
/// [`SiteError::FrontMatterMissingTitle`] for the first offending document.
pub fn build_navigation(tree: &RouteTree, storage: &dyn Storage) -> Result<Vec<NavItem>, SiteError> {
    let titles = load_titles(tree, storage)?;
    Ok(assemble(tree, &titles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Manifest, Route};
    use crate::route_tree::AddressingMode;
    use docmap_storage::MockStorage;
    use pretty_assertions::assert_eq;

    fn tree(routes: Vec<Route>, mode: AddressingMode) -> RouteTree {
        let manifest = Manifest {
            versions: vec!["v1".to_owned()],
            routes,
        };
        RouteTree::from_manifest(&manifest, mode)
    }

    fn doc(title: &str) -> String {
        format!("---\ntitle: {title}\n---\n# {title}\n\nBody text.\n")
    }

    fn leaf(title: &str, path: &str) -> NavItem {
        NavItem {
            title: title.to_owned(),
            path: path.to_owned(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_empty_tree() {
        let storage = MockStorage::new();
        let nav = build_navigation(&tree(vec![], AddressingMode::Absolute), &storage).unwrap();
        assert!(nav.is_empty());
    }

    #[test]
    fn test_navigation_mirrors_route_tree() {
        let storage = MockStorage::new()
            .with_file("index.md", doc("Home"))
            .with_file("guides/index.md", doc("Guides"))
            .with_file("guides/deploy.md", doc("Deploy"))
            .with_file("guides/setup.md", doc("Setup"))
            .with_file("faq.md", doc("FAQ"));
        let routes = vec![
            Route::new("index.md").with_children(vec![
                Route::new("guides/index.md").with_children(vec![
                    Route::new("guides/setup.md"),
                    Route::new("guides/deploy.md"),
                ]),
            ]),
            Route::new("faq.md"),
        ];

        let nav = build_navigation(&tree(routes, AddressingMode::Absolute), &storage).unwrap();

        assert_eq!(
            nav,
            vec![
                NavItem {
                    title: "Home".to_owned(),
                    path: String::new(),
                    children: vec![NavItem {
                        title: "Guides".to_owned(),
                        path: "guides".to_owned(),
                        children: vec![
                            leaf("Setup", "guides/setup"),
                            leaf("Deploy", "guides/deploy"),
                        ],
                    }],
                },
                leaf("FAQ", "faq"),
            ]
        );
    }

    #[test]
    fn test_navigation_reads_headers_only() {
        let storage = MockStorage::new()
            .with_file("index.md", doc("Home"))
            .with_file("a.md", doc("A"));
        let routes = vec![Route::new("index.md").with_children(vec![Route::new("a.md")])];

        build_navigation(&tree(routes, AddressingMode::Absolute), &storage).unwrap();

        assert_eq!(storage.full_reads(), 0);
    }

    #[test]
    fn test_relative_mode_paths() {
        let storage = MockStorage::new()
            .with_file("guides/index.md", doc("Guides"))
            .with_file("guides/deploy.md", doc("Deploy"));
        let routes = vec![Route::new("guides/index.md").with_children(vec![Route::new("deploy.md")])];

        let nav = build_navigation(&tree(routes, AddressingMode::Relative), &storage).unwrap();

        assert_eq!(nav[0].path, "guides");
        assert_eq!(nav[0].children[0].path, "guides/deploy");
        assert_eq!(nav[0].children[0].title, "Deploy");
    }

    #[test]
    fn test_missing_title_fails() {
        let storage = MockStorage::new().with_file("a.md", "# No header\n");
        let routes = vec![Route::new("a.md")];

        let err = build_navigation(&tree(routes, AddressingMode::Absolute), &storage).unwrap_err();

        assert!(matches!(err, SiteError::FrontMatterMissingTitle(p) if p == Path::new("a.md")));
    }

    #[test]
    fn test_missing_document_fails() {
        let storage = MockStorage::new();
        let routes = vec![Route::new("./gone.md")];

        let err = build_navigation(&tree(routes, AddressingMode::Absolute), &storage).unwrap_err();

        assert!(matches!(err, SiteError::SourceNotFound(p) if p == Path::new("./gone.md")));
    }

    #[test]
    fn test_serialization_skips_empty_children() {
        let json = serde_json::to_value(leaf("A", "a")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "A", "path": "a"}));
    }
}
