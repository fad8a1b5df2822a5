//! Static path enumeration for build-time page generation.

use serde::Serialize;

use crate::route_index::RouteIndex;

/// Pre-renderable page address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaticPath {
    /// URL path, empty for the root page.
    pub url_path: String,
    /// URL path split into segments. The root page is `[""]`.
    pub segments: Vec<String>,
}

impl StaticPath {
    fn new(url_path: &str) -> Self {
        let segments = if url_path.is_empty() {
            vec![String::new()]
        } else {
            url_path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        };
        Self {
            url_path: url_path.to_owned(),
            segments,
        }
    }
}

/// Every URL path of the index, in manifest declaration order.
#[must_use]
pub fn enumerate(index: &RouteIndex) -> Vec<StaticPath> {
    index.url_paths().map(StaticPath::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Manifest, Route};
    use crate::route_index::build_index;
    use crate::route_tree::AddressingMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_is_single_empty_segment() {
        let path = StaticPath::new("");
        assert_eq!(path.segments, vec![String::new()]);
    }

    #[test]
    fn test_nested_segments() {
        let path = StaticPath::new("guides/ops/rollback");
        assert_eq!(path.segments, vec!["guides", "ops", "rollback"]);
    }

    #[test]
    fn test_enumerate_follows_index_order() {
        let manifest = Manifest {
            versions: vec!["v1".to_owned()],
            routes: vec![Route::new("index.md").with_children(vec![Route::new("guides/deploy.md")])],
        };
        let index = build_index(&manifest, AddressingMode::Absolute).unwrap();

        let paths = enumerate(&index);

        let urls: Vec<&str> = paths.iter().map(|p| p.url_path.as_str()).collect();
        assert_eq!(urls, vec!["", "guides/deploy"]);
        assert_eq!(paths[1].segments, vec!["guides", "deploy"]);
    }

    #[test]
    fn test_enumerate_empty_index() {
        assert!(enumerate(&RouteIndex::default()).is_empty());
    }
}
