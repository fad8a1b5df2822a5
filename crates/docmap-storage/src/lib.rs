//! Source document storage for docmap.
//!
//! This crate provides a [`Storage`] trait for reading the documents a content
//! manifest refers to. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Bounded reads** when only a document's front matter header is needed
//! - **Clean separation** between manifest resolution and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()` and `read_header()` methods
//! - [`FsStorage`] implementation rooted at a content directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use docmap_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("content"));
//! let text = storage.read("guides/deploy.md")?;
//! # Ok::<(), docmap_storage::StorageError>(())
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{HEADER_DELIMITER, Storage, StorageError, StorageErrorKind, is_header_close};
