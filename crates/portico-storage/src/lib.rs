//! Directory listing abstraction for the Portico documentation portal.
//!
//! This crate provides a [`Listing`] trait that hides how the immediate
//! contents of a content directory are enumerated. This enables:
//!
//! - **Unit testing** of navigation logic without touching the real filesystem
//! - **Clean separation** between sidebar construction and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Listing`] trait with a single `list_entries()` method
//! - [`FsListing`] implementation backed by `std::fs::read_dir`
//! - [`MockListing`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use portico_storage::{FsListing, Listing};
//!
//! let listing = FsListing::new();
//! for entry in listing.list_entries(Path::new("docs"))? {
//!     println!("{} ({})", entry.name, entry.extension);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsListing;
#[cfg(feature = "mock")]
pub use mock::MockListing;
pub use storage::{DirectoryEntry, Listing, StorageError, StorageErrorKind};
