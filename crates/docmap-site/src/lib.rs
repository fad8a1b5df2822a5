//! Manifest resolution and content sanitizing for docmap.
//!
//! A JSON manifest declares a tree of markdown documents. This crate turns it
//! into:
//! - a [`RouteIndex`] mapping URL paths to source documents,
//! - a navigation tree of [`NavItem`] mirroring the manifest,
//! - sanitized [`Page`] content with rewritten links and heading anchors.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use docmap_site::{SiteConfig, SiteState};
//! use docmap_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content")));
//! let state = SiteState::warm_up(storage, &SiteConfig::default())?;
//!
//! let page = state.resolve(&["guides", "deploy"])?;
//! assert_eq!(page.version, state.version());
//! # Ok(())
//! # }
//! ```

mod content;
mod error;
mod front_matter;
mod links;
mod manifest;
mod navigation;
mod normalize;
mod page;
mod route_index;
mod route_tree;
mod site;
mod site_state;
mod static_paths;

pub use content::{Document, Heading, load_page, sanitize, slugify, strip_comments};
pub use error::SiteError;
pub use front_matter::{FrontMatter, parse_document, parse_front_matter};
pub use links::{Link, LinkKind, LinkStyle, relative_href};
pub use manifest::{Manifest, Route, load_manifest};
pub use navigation::{NavItem, build_navigation};
pub use normalize::{normalize, strip_index_segment};
pub use page::{BreadcrumbItem, Page};
pub use route_index::{RouteIndex, build_index};
pub use route_tree::{AddressingMode, RouteNode, RouteTree};
pub use site::{Site, SiteConfig};
pub use site_state::SiteState;
pub use static_paths::{StaticPath, enumerate};
