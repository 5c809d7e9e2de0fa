//! Listing trait and error types.
//!
//! Provides the core [`Listing`] trait for enumerating the immediate contents
//! of a directory, along with [`StorageError`] for unified error handling
//! across backends.

use std::path::{Path, PathBuf};

/// A single entry in a directory listing.
///
/// Entries are produced fresh on every listing and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name as it appears in the directory (no parent path).
    pub name: String,
    /// True if the entry is a regular file (symlinks are followed).
    pub is_file: bool,
    /// Dot-prefixed extension derived from the name (e.g. ".md").
    ///
    /// Empty when the name has no extension. Dotfiles such as `.bashrc`
    /// have no extension; a trailing dot yields ".".
    pub extension: String,
}

impl DirectoryEntry {
    /// Create an entry, deriving the extension from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, is_file: bool) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            is_file,
            extension,
        }
    }

    /// Create a regular file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Create a non-file entry (directory, socket, dangling link).
    #[must_use]
    pub fn other(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

/// Extension of a file name including the leading dot.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Directory does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path exists but is not a directory.
    NotADirectory,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a not-a-directory error with path.
    #[must_use]
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotADirectory).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::NotADirectory => StorageErrorKind::NotADirectory,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::NotADirectory => "Not a directory",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Capability for listing the immediate contents of a directory.
///
/// Implementations must not recurse into subdirectories and must return
/// entries in the order the backend produces them. Callers rely on that
/// order for navigation, so implementations should not sort.
pub trait Listing: Send + Sync {
    /// List the direct children of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `path` does not exist, is not a directory,
    /// or cannot be read. No partial listing is returned.
    fn list_entries(&self, path: &Path) -> Result<Vec<DirectoryEntry>, StorageError>;
}

impl<T: Listing + ?Sized> Listing for &T {
    fn list_entries(&self, path: &Path) -> Result<Vec<DirectoryEntry>, StorageError> {
        (**self).list_entries(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_markdown_extension() {
        let entry = DirectoryEntry::file("readme.md");

        assert_eq!(entry.name, "readme.md");
        assert!(entry.is_file);
        assert_eq!(entry.extension, ".md");
    }

    #[test]
    fn test_entry_last_extension_wins() {
        let entry = DirectoryEntry::file("archive.tar.gz");
        assert_eq!(entry.extension, ".gz");
    }

    #[test]
    fn test_entry_without_extension() {
        let entry = DirectoryEntry::file("LICENSE");
        assert_eq!(entry.extension, "");
    }

    #[test]
    fn test_entry_dotfile_has_no_extension() {
        let entry = DirectoryEntry::file(".bashrc");
        assert_eq!(entry.extension, "");
    }

    #[test]
    fn test_entry_trailing_dot() {
        let entry = DirectoryEntry::file("draft.");
        assert_eq!(entry.extension, ".");
    }

    #[test]
    fn test_entry_directory_keeps_extension() {
        let entry = DirectoryEntry::other("notes.md");

        assert!(!entry.is_file);
        assert_eq!(entry.extension, ".md");
    }

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such dir");
        let err = StorageError::io(io_err, Some(PathBuf::from("/docs")));

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("/docs")));
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_storage_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_storage_error_io_other() {
        let io_err = std::io::Error::other("disk on fire");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind, StorageErrorKind::Other);
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotADirectory);
        assert_eq!(err.to_string(), "Not a directory");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such dir");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/docs")
            .with_source(io_err);

        assert_eq!(err.to_string(), "[Fs] Not found: no such dir (path: /docs)");
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
