//! Lazily warmed site.
//!
//! [`Site`] wraps a [`SiteState`] that is built on first use. Concurrent first
//! access is serialized with double-checked locking, so the manifest and
//! navigation are loaded exactly once no matter how many threads race:
//!
//! 1. Fast path: return the current state under a read lock.
//! 2. Slow path: take the warm-up lock, check again, then build.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use docmap_site::{Site, SiteConfig};
//! use docmap_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content")));
//! let site = Site::new(storage, SiteConfig::default());
//!
//! for path in site.static_paths()? {
//!     let page = site.resolve(&path.segments)?;
//!     println!("{}: {}", path.url_path, page.attributes.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, RwLock};

use docmap_storage::Storage;

use crate::error::SiteError;
use crate::links::LinkStyle;
use crate::navigation::NavItem;
use crate::page::Page;
use crate::route_tree::AddressingMode;
use crate::site_state::SiteState;
use crate::static_paths::StaticPath;

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Manifest location relative to the content root.
    pub manifest_path: String,
    /// How nested route paths are resolved.
    pub addressing: AddressingMode,
    /// How rewritten links are addressed.
    pub links: LinkStyle,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            manifest_path: "manifest.json".to_owned(),
            addressing: AddressingMode::default(),
            links: LinkStyle::default(),
        }
    }
}

/// Site with lazily built, shared state.
///
/// # Thread Safety
///
/// - `RwLock<Option<Arc<SiteState>>>` holds the current snapshot
/// - `Mutex<()>` serializes warm-up
///
/// Readers keep their `Arc<SiteState>` across a [`Site::reset`].
pub struct Site {
    storage: Arc<dyn Storage>,
    config: SiteConfig,
    /// Mutex for serializing warm-up.
    warm_up_lock: Mutex<()>,
    current_state: RwLock<Option<Arc<SiteState>>>,
}

impl Site {
    /// Create a site. Nothing is read until first use.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: SiteConfig) -> Self {
        Self {
            storage,
            config,
            warm_up_lock: Mutex::new(()),
            current_state: RwLock::new(None),
        }
    }

    /// Get the warm site state, building it on first call.
    ///
    /// A failed warm-up leaves the site cold, so the next call retries.
    ///
    /// # Errors
    ///
    /// Returns the warm-up error from [`SiteState::warm_up`].
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn state(&self) -> Result<Arc<SiteState>, SiteError> {
        if let Some(state) = self.current_state.read().unwrap().as_ref() {
            return Ok(Arc::clone(state));
        }

        let _guard = self.warm_up_lock.lock().unwrap();

        if let Some(state) = self.current_state.read().unwrap().as_ref() {
            return Ok(Arc::clone(state));
        }

        tracing::debug!(manifest = %self.config.manifest_path, "Warming up site");
        let state = Arc::new(SiteState::warm_up(
            Arc::clone(&self.storage),
            &self.config,
        )?);
        *self.current_state.write().unwrap() = Some(Arc::clone(&state));

        Ok(state)
    }

    /// Drop the current state. The next access rebuilds it.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn reset(&self) {
        let _guard = self.warm_up_lock.lock().unwrap();
        *self.current_state.write().unwrap() = None;
    }

    /// Resolve URL path segments to a page.
    ///
    /// # Errors
    ///
    /// Returns warm-up errors and errors from [`SiteState::resolve`].
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<Page, SiteError> {
        self.state()?.resolve(segments)
    }

    /// Every pre-renderable page.
    ///
    /// # Errors
    ///
    /// Returns warm-up errors.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn static_paths(&self) -> Result<Vec<StaticPath>, SiteError> {
        Ok(self.state()?.static_paths())
    }

    /// Site-wide navigation tree.
    ///
    /// # Errors
    ///
    /// Returns warm-up errors.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn navigation(&self) -> Result<Vec<NavItem>, SiteError> {
        Ok(self.state()?.navigation().to_vec())
    }
}
