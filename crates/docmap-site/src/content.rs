//! Content loading and sanitizing.
//!
//! A page body goes through three passes after the front matter is split off:
//! HTML comments are removed, intra-site links are rewritten for the page's
//! URL, and headings are collected with their anchor identifiers.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use docmap_storage::Storage;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;

use crate::error::SiteError;
use crate::front_matter::{FrontMatter, parse_document};
use crate::links::{Link, LinkRewriter, LinkStyle};

/// HTML comment, possibly spanning lines.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Markdown extensions recognized when scanning bodies.
pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Heading found in a document body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Plain text content.
    pub text: String,
    /// Anchor identifier derived from the text.
    pub id: String,
}

/// Sanitized document ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Parsed front matter.
    pub front_matter: FrontMatter,
    /// Body with comments removed and links rewritten.
    pub body: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// Links in document order.
    pub links: Vec<Link>,
}

/// Remove HTML comments from markdown text.
///
/// # Examples
///
/// ```
/// use docmap_site::strip_comments;
///
/// assert_eq!(strip_comments("before<!-- note -->after"), "beforeafter");
/// ```
#[must_use]
pub fn strip_comments(text: &str) -> String {
    COMMENT_RE.replace_all(text, "").into_owned()
}

/// Convert heading text to an anchor identifier.
///
/// Lower-cases the text, keeps alphanumerics, drops apostrophes and turns
/// every other run of characters into a single `-`.
///
/// # Examples
///
/// ```
/// use docmap_site::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("What's new?"), "whats-new");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && c != '\'' && c != '\u{2019}' {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Collect headings from a markdown body.
///
/// Identifiers are not deduplicated; repeated heading text logs a warning.
pub(crate) fn extract_headings(body: &str, path: &Path) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new_ext(body, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let text = text.trim().to_owned();
                    let id = slugify(&text);
                    headings.push(Heading { level, text, id });
                }
            }
            _ => {}
        }
    }

    let mut seen = HashSet::new();
    for heading in &headings {
        if !seen.insert(heading.id.as_str()) {
            tracing::warn!(path = %path.display(), id = %heading.id, "Duplicate heading identifier");
        }
    }

    headings
}

/// Sanitize a document already read from storage.
///
/// # Errors
///
/// Returns front matter errors from [`parse_document`].
pub fn sanitize(
    text: &str,
    source_path: &str,
    current_url: &str,
    style: LinkStyle,
) -> Result<Document, SiteError> {
    let path = Path::new(source_path);
    let (front_matter, body) = parse_document(text, path)?;

    let body = strip_comments(body);
    let (body, links) = LinkRewriter::new(source_path, current_url, style).rewrite_body(&body);
    let headings = extract_headings(&body, path);

    Ok(Document {
        front_matter,
        body,
        headings,
        links,
    })
}

/// Load a source document and sanitize it for the page at `current_url`.
///
/// # Errors
///
/// Returns [`SiteError::SourceNotFound`] when the document is missing,
/// [`SiteError::Storage`] for other read failures, and front matter errors
/// from [`parse_document`].
pub fn load_page(
    storage: &dyn Storage,
    source_path: &str,
    current_url: &str,
    style: LinkStyle,
) -> Result<Document, SiteError> {
    let text = storage
        .read(source_path)
        .map_err(|e| SiteError::from_source_read(e, source_path))?;
    sanitize(&text, source_path, current_url, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkKind;
    use docmap_storage::MockStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_comments_inline() {
        assert_eq!(strip_comments("before<!-- note -->after"), "beforeafter");
    }

    #[test]
    fn test_strip_comments_multiline_non_greedy() {
        let text = "a<!--\nline one\nline two\n-->b<!-- x -->c";
        assert_eq!(strip_comments(text), "abc");
    }

    #[test]
    fn test_strip_comments_unclosed_is_kept() {
        assert_eq!(strip_comments("a<!-- open"), "a<!-- open");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  API -- Reference  "), "api-reference");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("Don't Panic"), "dont-panic");
        assert_eq!(slugify("Über Café"), "über-café");
        assert_eq!(slugify("v1.2"), "v1-2");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_is_pure() {
        assert_eq!(slugify("Install"), slugify("Install"));
    }

    #[test]
    fn test_extract_headings() {
        let body = "# Deploy\n\nText\n\n## Using `kubectl`\n\n### Roll *back*\n";

        let headings = extract_headings(body, Path::new("a.md"));

        assert_eq!(
            headings,
            vec![
                Heading {
                    level: 1,
                    text: "Deploy".to_owned(),
                    id: "deploy".to_owned(),
                },
                Heading {
                    level: 2,
                    text: "Using kubectl".to_owned(),
                    id: "using-kubectl".to_owned(),
                },
                Heading {
                    level: 3,
                    text: "Roll back".to_owned(),
                    id: "roll-back".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_headings_keep_same_id() {
        let headings = extract_headings("## Example\n\n## Example\n", Path::new("a.md"));
        assert_eq!(headings[0].id, "example");
        assert_eq!(headings[1].id, "example");
    }

    #[test]
    fn test_setext_heading() {
        let headings = extract_headings("Title\n=====\n", Path::new("a.md"));
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].id, "title");
    }

    #[test]
    fn test_sanitize_pipeline() {
        let text = "---\ntitle: Deploy\n---\n# Deploy<!-- draft -->\n\nSee [setup](setup.md).\n<!-- [hidden](gone.md) -->\n";

        let doc = sanitize(text, "guides/deploy.md", "guides/deploy", LinkStyle::default()).unwrap();

        assert_eq!(doc.front_matter.title, "Deploy");
        assert_eq!(doc.body, "# Deploy\n\nSee [setup](setup).\n\n");
        assert_eq!(doc.headings.len(), 1);
        assert_eq!(doc.headings[0].id, "deploy");
        assert_eq!(doc.links.len(), 1);
        assert_eq!(
            doc.links[0].kind,
            LinkKind::Page {
                url_path: "guides/setup".to_owned()
            }
        );
    }

    #[test]
    fn test_load_page_reads_storage() {
        let storage = MockStorage::new().with_file("index.md", "---\ntitle: Home\n---\nWelcome");

        let doc = load_page(&storage, "./index.md", "", LinkStyle::default()).unwrap();

        assert_eq!(doc.front_matter.title, "Home");
        assert_eq!(doc.body, "Welcome");
        assert_eq!(storage.full_reads(), 1);
    }

    #[test]
    fn test_load_page_missing_source() {
        let storage = MockStorage::new();

        let err = load_page(&storage, "gone.md", "gone", LinkStyle::default()).unwrap_err();

        assert!(matches!(err, SiteError::SourceNotFound(p) if p == Path::new("gone.md")));
    }

    #[test]
    fn test_load_page_malformed_header() {
        let storage = MockStorage::new().with_file("a.md", "---\ntitle: A\n");

        let err = load_page(&storage, "a.md", "a", LinkStyle::default()).unwrap_err();

        assert!(matches!(err, SiteError::FrontMatterParse { .. }));
    }
}
