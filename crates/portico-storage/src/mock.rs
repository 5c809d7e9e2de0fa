//! Mock listing implementation for testing.
//!
//! Provides [`MockListing`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{DirectoryEntry, Listing, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Extract directory and filename from a path.
fn split_path(path: &Path) -> (PathBuf, String) {
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, name)
}

/// In-memory directory tree for testing.
///
/// Entries are returned in insertion order, which lets tests pin down
/// listing order explicitly. Use the builder methods to configure the mock.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use portico_storage::{Listing, MockListing};
///
/// let listing = MockListing::new()
///     .with_file("docs/readme.md")
///     .with_dir("docs/assets");
///
/// let entries = listing.list_entries(Path::new("docs")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockListing {
    dirs: HashMap<PathBuf, Vec<DirectoryEntry>>,
    files: HashSet<PathBuf>,
    denied: HashSet<PathBuf>,
    calls: AtomicUsize,
}

impl MockListing {
    /// Create a new empty mock listing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty directory, creating parents as needed.
    #[must_use]
    pub fn with_empty_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.ensure_dir(&path.into());
        self
    }

    /// Add a regular file. Its parent directory is created if missing.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let (dir, name) = split_path(&path);
        self.ensure_dir(&dir);
        self.push_entry(&dir, DirectoryEntry::file(name));
        self.files.insert(path);
        self
    }

    /// Add a subdirectory entry. The subdirectory itself is listable and empty.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        self.ensure_dir(&path);
        self
    }

    /// Make listing `path` fail with a permission error.
    #[must_use]
    pub fn with_denied(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        self.ensure_dir(&path);
        self.denied.insert(path);
        self
    }

    /// Number of `list_entries` calls served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.dirs.contains_key(path) {
            return;
        }
        self.dirs.insert(path.to_path_buf(), Vec::new());

        if path.as_os_str().is_empty() {
            return;
        }
        let (parent, name) = split_path(path);
        self.ensure_dir(&parent);
        self.push_entry(&parent, DirectoryEntry::other(name));
    }

    fn push_entry(&mut self, dir: &Path, entry: DirectoryEntry) {
        if let Some(entries) = self.dirs.get_mut(dir) {
            entries.retain(|e| e.name != entry.name);
            entries.push(entry);
        }
    }
}

impl Listing for MockListing {
    fn list_entries(&self, path: &Path) -> Result<Vec<DirectoryEntry>, StorageError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if self.denied.contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        if self.files.contains(path) {
            return Err(StorageError::not_a_directory(path).with_backend(BACKEND));
        }

        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}
