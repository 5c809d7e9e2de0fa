//! Filesystem listing implementation.
//!
//! Provides [`FsListing`] for enumerating directory contents on the local
//! filesystem.

use std::fs;
use std::path::Path;

use crate::storage::{DirectoryEntry, Listing, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem listing backed by `std::fs::read_dir`.
///
/// Entries are returned in the order the operating system yields them.
/// That order is not guaranteed to be stable across platforms or
/// filesystems. Symlinks are followed when deciding whether an entry is a
/// regular file; dangling links count as non-files and are reported with a
/// warning. A file name that is not valid UTF-8 fails the listing, since it
/// cannot be handed out as a page identifier unchanged.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use portico_storage::{FsListing, Listing};
///
/// let entries = FsListing::new().list_entries(Path::new("docs"))?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FsListing;

impl FsListing {
    /// Create a new filesystem listing.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Entry name as a `String`, failing on names that are not valid UTF-8.
    fn entry_name(entry: &fs::DirEntry) -> Result<String, StorageError> {
        entry.file_name().into_string().map_err(|raw| {
            let err = std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("file name {raw:?} is not valid UTF-8"),
            );
            StorageError::io(err, Some(entry.path())).with_backend(BACKEND)
        })
    }

    /// Resolve whether a directory entry is a regular file.
    fn is_regular_file(entry: &fs::DirEntry) -> Result<bool, std::io::Error> {
        let file_type = entry.file_type()?;
        if !file_type.is_symlink() {
            return Ok(file_type.is_file());
        }

        // Follow the link; a dangling link is not a file.
        match fs::metadata(entry.path()) {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) => {
                tracing::warn!(path = %entry.path().display(), error = %err, "Dangling symlink");
                Ok(false)
            }
        }
    }
}

impl Listing for FsListing {
    fn list_entries(&self, path: &Path) -> Result<Vec<DirectoryEntry>, StorageError> {
        let io_err = |err: std::io::Error| {
            StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND)
        };

        let meta = fs::metadata(path).map_err(io_err)?;
        if !meta.is_dir() {
            return Err(StorageError::not_a_directory(path).with_backend(BACKEND));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let is_file = Self::is_regular_file(&entry).map_err(io_err)?;
            let name = Self::entry_name(&entry)?;
            entries.push(DirectoryEntry::new(name, is_file));
        }

        tracing::trace!(path = %path.display(), count = entries.len(), "Listed directory");
        Ok(entries)
    }
}
