//! Recognized page file extensions.

use std::collections::BTreeSet;

use crate::error::FilterError;

/// Fixed set of dot-prefixed suffixes a page file must end with.
///
/// Matching is exact and case-sensitive: `.md` does not match `README.MD`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Build a filter from dot-prefixed suffixes such as `.md`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Empty`] when no suffix is given and
    /// [`FilterError::Malformed`] for a suffix without a leading dot, with
    /// nothing after the dot, or with a second dot.
    pub fn new<I, S>(extensions: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for ext in extensions {
            let ext = ext.into();
            let valid = ext
                .strip_prefix('.')
                .is_some_and(|rest| !rest.is_empty() && !rest.contains(&['.', '/', '\\'][..]));
            if !valid {
                return Err(FilterError::Malformed(ext));
            }
            set.insert(ext);
        }

        if set.is_empty() {
            return Err(FilterError::Empty);
        }
        Ok(Self { extensions: set })
    }

    /// Filter recognizing markdown pages only.
    #[must_use]
    pub fn markdown() -> Self {
        Self {
            extensions: BTreeSet::from([".md".to_owned()]),
        }
    }

    /// Check whether a dot-prefixed extension is recognized.
    #[must_use]
    pub fn matches(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// Iterate recognized extensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}
