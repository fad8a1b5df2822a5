//! Front matter header parsing.
//!
//! A document may open with a YAML header fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Deploy
//! description: Shipping to production
//! ---
//! # Deploy
//! ```
//!
//! The closing fence may also be the YAML document end marker `...`.
//! Keys other than `title` and `description` are ignored.

use std::path::Path;

use docmap_storage::{HEADER_DELIMITER, is_header_close};
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Parsed document header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    /// Page title, used for navigation labels.
    pub title: String,
    /// Optional summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields read from the YAML header before validation.
#[derive(Default, Deserialize)]
struct RawFrontMatter {
    title: Option<String>,
    description: Option<String>,
}

/// Split a document into its YAML header and body.
///
/// Returns `Ok((None, text))` when the document has no header and an error
/// message when the header is never closed.
fn split(text: &str) -> Result<(Option<&str>, &str), &'static str> {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((None, text));
    };
    if first.trim_end() != HEADER_DELIMITER {
        return Ok((None, text));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_header_close(line) {
            let yaml = &text[yaml_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err("missing closing front matter delimiter")
}

/// Parse the YAML between the fences.
fn parse_yaml(yaml: &str, path: &Path) -> Result<FrontMatter, SiteError> {
    let trimmed = yaml.trim();
    let raw: RawFrontMatter = if trimmed.is_empty() {
        RawFrontMatter::default()
    } else {
        serde_yaml::from_str(trimmed).map_err(|e| SiteError::FrontMatterParse {
            path: path.to_path_buf(),
            message: format!("Invalid YAML: {e}"),
        })?
    };

    let title = raw
        .title
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SiteError::FrontMatterMissingTitle(path.to_path_buf()))?;

    Ok(FrontMatter {
        title,
        description: raw.description,
    })
}

/// Parse a full document into its front matter and body.
///
/// # Errors
///
/// Returns [`SiteError::FrontMatterParse`] for an unclosed header or invalid
/// YAML, and [`SiteError::FrontMatterMissingTitle`] when there is no header
/// or the header has no non-empty `title`.
pub fn parse_document<'a>(text: &'a str, path: &Path) -> Result<(FrontMatter, &'a str), SiteError> {
    let (yaml, body) = split(text).map_err(|message| SiteError::FrontMatterParse {
        path: path.to_path_buf(),
        message: message.to_owned(),
    })?;
    let front_matter = parse_yaml(yaml.unwrap_or_default(), path)?;
    Ok((front_matter, body))
}

/// Parse only the front matter of a document.
///
/// Accepts either a full document or the header prefix returned by
/// [`Storage::read_header`](docmap_storage::Storage::read_header).
///
/// # Errors
///
/// Same as [`parse_document`].
pub fn parse_front_matter(text: &str, path: &Path) -> Result<FrontMatter, SiteError> {
    parse_document(text, path).map(|(front_matter, _)| front_matter)
}
