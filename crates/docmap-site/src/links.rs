//! Intra-site link rewriting.
//!
//! Inline markdown links are located with `pulldown-cmark` offset events, so
//! link syntax inside code spans and fenced blocks is left alone. Only the
//! destination text of each link is replaced; labels and titles keep their
//! original bytes.

use pulldown_cmark::{Event, LinkType, Parser, Tag};
use serde::Serialize;

use crate::content::markdown_options;
use crate::normalize::strip_index_segment;

/// How rewritten links are addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkStyle {
    /// Rebase links relative to the current page. When `false`, links
    /// become absolute `/a/b` paths.
    pub relative: bool,
    /// Pages are served as directories, so the current page URL is its own
    /// base when rebasing.
    pub trailing_slash: bool,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            relative: true,
            trailing_slash: false,
        }
    }
}

/// Classification of a link found in a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LinkKind {
    /// Markdown document inside the site.
    Page {
        /// URL path the link points to.
        url_path: String,
    },
    /// Non-document file inside the site (image, archive, ...).
    Asset,
    /// Fragment-only link within the same page.
    Anchor,
    /// Out-of-site link, rendered to open in a new context.
    External,
}

/// Link found in a document body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Destination as written by the author.
    pub original: String,
    /// Destination after rewriting.
    pub href: String,
    /// Link classification.
    #[serde(flatten)]
    pub kind: LinkKind,
    /// Fragment of an intra-site target, without `#`. It is not part of
    /// `href`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

/// Relative href from one page to another.
///
/// Both arguments are URL paths. With `trailing_slash`, pages are served as
/// directories (`/guides/deploy/`), so hrefs to pages end in `/`. Without
/// it, a page is the last segment of its URL and hrefs never end in `/`
/// unless they point at the root page.
///
/// # Examples
///
/// ```
/// use docmap_site::relative_href;
///
/// assert_eq!(relative_href("guides/deploy", "guides/setup", false), "setup");
/// assert_eq!(relative_href("guides/deploy", "guides", false), "../guides");
/// assert_eq!(relative_href("guides/deploy", "guides", true), "../");
/// assert_eq!(relative_href("", "guides/deploy", true), "guides/deploy/");
/// ```
#[must_use]
pub fn relative_href(from: &str, to: &str, trailing_slash: bool) -> String {
    rebase(from, to, trailing_slash, trailing_slash)
}

/// Rebase `to` against the page at `from`.
///
/// `from_is_dir` makes the current page its own base directory.
/// `to_is_dir` makes the target addressed as a directory.
fn rebase(from: &str, to: &str, from_is_dir: bool, to_is_dir: bool) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let base = if from_is_dir {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len().saturating_sub(1)]
    };

    let common = base
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();
    let mut ups = base.len() - common;
    let mut rest = &to_segs[common..];

    // Target is an ancestor of the base: climb past it and name it.
    if rest.is_empty() && !to_segs.is_empty() && !to_is_dir {
        ups += 1;
        rest = &to_segs[to_segs.len() - 1..];
    }

    let mut href = "../".repeat(ups);
    href.push_str(&rest.join("/"));
    if to_is_dir && !rest.is_empty() {
        href.push('/');
    }
    if href.is_empty() {
        href.push_str("./");
    }
    href
}

/// Whether a link target leaves the site.
fn is_external(url: &str) -> bool {
    url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
}

/// Resolve a relative path against a directory, dropping `.` and `..`.
///
/// `..` at the content root is ignored rather than escaping it.
fn resolve_relative_path(relative: &str, base_dir: &str) -> String {
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}

/// Rewrites link destinations for one page.
pub(crate) struct LinkRewriter<'a> {
    /// Directory of the source document, relative to the content root.
    source_dir: &'a str,
    /// URL path of the page being rendered, fragment removed.
    current_url: &'a str,
    style: LinkStyle,
}

impl<'a> LinkRewriter<'a> {
    pub(crate) fn new(source_path: &'a str, current_url: &'a str, style: LinkStyle) -> Self {
        let source_path = source_path.strip_prefix("./").unwrap_or(source_path);
        let source_dir = source_path.rsplit_once('/').map_or("", |(dir, _)| dir);
        let current_url = current_url
            .split_once('#')
            .map_or(current_url, |(path, _)| path);
        Self {
            source_dir,
            current_url,
            style,
        }
    }

    /// Rewrite a single destination.
    pub(crate) fn rewrite(&self, url: &str) -> Link {
        let original = url.to_owned();

        if is_external(url) {
            return Link {
                href: original.clone(),
                original,
                kind: LinkKind::External,
                fragment: None,
            };
        }
        if url.is_empty() || url.starts_with('#') {
            return Link {
                href: original.clone(),
                original,
                kind: LinkKind::Anchor,
                fragment: None,
            };
        }

        let (path_part, fragment) = match url.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment.to_owned())),
            None => (url, None),
        };

        let resolved = match path_part.strip_prefix('/') {
            Some(absolute) => resolve_relative_path(absolute, ""),
            None => resolve_relative_path(path_part, self.source_dir),
        };

        let is_page = resolved.ends_with(".md");
        let clean = resolved.strip_suffix(".md").unwrap_or(&resolved);
        let target = strip_index_segment(clean).trim_end_matches('/');

        let to_is_dir = is_page && self.style.trailing_slash;
        let href = if self.style.relative {
            rebase(self.current_url, target, self.style.trailing_slash, to_is_dir)
        } else if to_is_dir && !target.is_empty() {
            format!("/{target}/")
        } else {
            format!("/{target}")
        };

        let kind = if is_page {
            LinkKind::Page {
                url_path: target.to_owned(),
            }
        } else {
            LinkKind::Asset
        };

        Link {
            original,
            href,
            kind,
            fragment,
        }
    }

    /// Rewrite every inline link of a markdown body.
    ///
    /// Returns the rewritten body and the links in document order.
    pub(crate) fn rewrite_body(&self, body: &str) -> (String, Vec<Link>) {
        let mut links = Vec::new();
        let mut replacements: Vec<(std::ops::Range<usize>, String)> = Vec::new();

        let parser = Parser::new_ext(body, markdown_options()).into_offset_iter();
        for (event, range) in parser {
            let Event::Start(Tag::Link {
                link_type,
                dest_url,
                ..
            }) = event
            else {
                continue;
            };

            match link_type {
                LinkType::Inline => {
                    let link = self.rewrite(&dest_url);
                    if link.href != link.original {
                        match locate_destination(body, range, &dest_url) {
                            Some(span) => replacements.push((span, link.href.clone())),
                            None => tracing::debug!(url = %dest_url, "Link destination not found verbatim, left as written"),
                        }
                    }
                    links.push(link);
                }
                LinkType::Autolink | LinkType::Email => links.push(Link {
                    original: dest_url.to_string(),
                    href: dest_url.to_string(),
                    kind: LinkKind::External,
                    fragment: None,
                }),
                _ => tracing::debug!(url = %dest_url, "Reference link left as written"),
            }
        }

        if replacements.is_empty() {
            return (body.to_owned(), links);
        }

        let mut out = String::with_capacity(body.len());
        let mut cursor = 0;
        for (span, href) in replacements {
            out.push_str(&body[cursor..span.start]);
            out.push_str(&href);
            cursor = span.end;
        }
        out.push_str(&body[cursor..]);

        (out, links)
    }
}

/// Byte span of an inline link's destination inside `body`.
///
/// `range` covers the whole `[label](dest "title")` construct.
fn locate_destination(
    body: &str,
    range: std::ops::Range<usize>,
    dest: &str,
) -> Option<std::ops::Range<usize>> {
    let slice = body.get(range.clone())?;
    let open = slice.rfind("](")? + 2;
    let after = &slice[open..];
    let trimmed = after.trim_start();
    let mut start = open + (after.len() - trimmed.len());
    let trimmed = match trimmed.strip_prefix('<') {
        Some(rest) => {
            start += 1;
            rest
        }
        None => trimmed,
    };
    trimmed
        .starts_with(dest)
        .then_some(range.start + start..range.start + start + dest.len())
}
