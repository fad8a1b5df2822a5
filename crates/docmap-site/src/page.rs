//! Resolved page types.

use serde::Serialize;

use crate::content::Heading;
use crate::front_matter::FrontMatter;
use crate::links::Link;
use crate::navigation::NavItem;

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
}

/// Everything the render layer needs for one URL path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// URL path this page was resolved from.
    pub url_path: String,
    /// Sanitized markdown body.
    pub content: String,
    /// Front matter of the source document.
    pub attributes: FrontMatter,
    /// Site-wide navigation tree.
    pub navigation: Vec<NavItem>,
    /// Current content version.
    pub version: String,
    /// Ancestor pages, root first, current page excluded.
    pub breadcrumbs: Vec<BreadcrumbItem>,
    /// Headings with anchor identifiers.
    pub headings: Vec<Heading>,
    /// Links found in the body.
    pub links: Vec<Link>,
}
