//! Error types for sidebar construction.

use std::path::PathBuf;

use portico_storage::StorageError;

/// A content directory could not be listed.
///
/// Raised when the directory is missing, is not a directory, or cannot be
/// read. This aborts configuration assembly; there is no partial sidebar.
#[derive(Debug, thiserror::Error)]
#[error("Cannot read content directory {}: {source}", .path.display())]
pub struct DirectoryAccessError {
    /// Directory that was being scanned.
    pub path: PathBuf,
    /// Underlying storage failure.
    #[source]
    pub source: StorageError,
}

/// Invalid extension filter.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// No extensions were given.
    #[error("Extension filter cannot be empty")]
    Empty,
    /// Extension is not a single dot-prefixed segment such as `.md`.
    #[error(
        "Extension {0:?} must be a single segment after one leading '.' (like \".md\"), \
         without further dots or path separators"
    )]
    Malformed(String),
}
