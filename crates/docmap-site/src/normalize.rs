//! Source path to URL path normalization.
//!
//! URL paths are `/`-joined, carry no extension, no trailing `index`
//! segment and no leading or trailing slash. The empty string is the root
//! page.

/// Markdown file extension removed from source paths.
const MARKDOWN_EXT: &str = ".md";

/// Segment name that denotes a section landing page.
const INDEX_SEGMENT: &str = "index";

/// Convert a manifest source path into its canonical URL path.
///
/// Steps, in order:
/// 1. every `.md` occurrence is removed (not only a suffix)
/// 2. a leading `./` is removed
/// 3. trailing `index` segments are removed ([`strip_index_segment`])
/// 4. trailing `/` characters are removed
///
/// # Examples
///
/// ```
/// use docmap_site::normalize;
///
/// assert_eq!(normalize("./getting-started/index.md"), "getting-started");
/// assert_eq!(normalize("./index.md"), "");
/// assert_eq!(normalize("guides/deploy.md"), "guides/deploy");
/// assert_eq!(normalize("a/b/index.md/index.md"), "a/b");
/// ```
#[must_use]
pub fn normalize(source_path: &str) -> String {
    let without_ext = source_path.replace(MARKDOWN_EXT, "");
    let relative = without_ext.strip_prefix("./").unwrap_or(&without_ext);
    let without_index = strip_index_segment(relative);
    without_index.trim_end_matches('/').to_owned()
}

/// Remove trailing `index` segments from a path.
///
/// Only whole segments are removed: a path equal to `index` becomes empty,
/// a path ending in `/index` loses that suffix. Segments that merely end in
/// the same letters (`reindex`) are kept.
#[must_use]
pub fn strip_index_segment(path: &str) -> &str {
    let mut current = path;
    loop {
        if current == INDEX_SEGMENT {
            return "";
        }
        match current
            .strip_suffix(INDEX_SEGMENT)
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nested_index() {
        assert_eq!(normalize("./getting-started/index.md"), "getting-started");
    }

    #[test]
    fn test_normalize_root_index() {
        assert_eq!(normalize("./index.md"), "");
        assert_eq!(normalize("index.md"), "");
    }

    #[test]
    fn test_normalize_plain_page() {
        assert_eq!(normalize("guides/deploy.md"), "guides/deploy");
    }

    #[test]
    fn test_normalize_removes_every_md_occurrence() {
        assert_eq!(normalize("a/b/index.md/index.md"), "a/b");
        assert_eq!(normalize("notes.md/page.md"), "notes/page");
    }

    #[test]
    fn test_normalize_keeps_segments_ending_in_index() {
        assert_eq!(normalize("reindex.md"), "reindex");
        assert_eq!(normalize("ops/reindex/index.md"), "ops/reindex");
        assert_eq!(normalize("ops/reindex.md"), "ops/reindex");
    }

    #[test]
    fn test_normalize_trailing_slash() {
        assert_eq!(normalize("guides/"), "guides");
        assert_eq!(normalize("./guides//"), "guides");
    }

    #[test]
    fn test_normalize_only_strips_one_leading_marker() {
        assert_eq!(normalize("././a.md"), "./a");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        for path in ["./index.md", "x/y/index.md", "a.md", "", "index/reindex.md"] {
            assert_eq!(normalize(path), normalize(path));
        }
    }

    #[test]
    fn test_strip_index_segment() {
        assert_eq!(strip_index_segment("index"), "");
        assert_eq!(strip_index_segment("a/index"), "a");
        assert_eq!(strip_index_segment("a/index/index"), "a");
        assert_eq!(strip_index_segment("reindex"), "reindex");
        assert_eq!(strip_index_segment("a/reindex"), "a/reindex");
        assert_eq!(strip_index_segment("index/a"), "index/a");
        assert_eq!(strip_index_segment(""), "");
    }
}
