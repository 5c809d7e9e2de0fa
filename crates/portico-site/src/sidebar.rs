//! Sidebar navigation built from content directory listings.
//!
//! A sidebar group lists the page files found directly inside one content
//! directory. Subdirectories are never descended into, and entries keep the
//! order the listing backend returned them in unless a section opts into
//! name ordering.

use std::path::{Path, PathBuf};

use portico_storage::Listing;
use serde::Serialize;

use crate::error::DirectoryAccessError;
use crate::filter::ExtensionFilter;

/// Ordering applied to a sidebar group's pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SidebarOrder {
    /// Keep the order returned by the directory listing.
    ///
    /// Filesystem listing order is platform dependent and may change between
    /// machines.
    #[default]
    Listing,
    /// Sort page identifiers lexicographically by byte value.
    Name,
}

/// Navigation section rendered as a titled group of pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarGroup {
    /// Group title.
    pub text: String,
    /// Always true; tells the renderer to draw a collapsible group.
    pub is_group: bool,
    /// Page identifiers (file names) in display order.
    pub children: Vec<String>,
}

impl SidebarGroup {
    /// Create a group with the given title and pages.
    #[must_use]
    pub fn new(text: impl Into<String>, children: Vec<String>) -> Self {
        Self {
            text: text.into(),
            is_group: true,
            children,
        }
    }
}

/// A content directory to scan and where its group goes in the sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarSection {
    /// Route prefix the group is attached to (e.g. `/docs/`).
    pub route: String,
    /// Group title.
    pub title: String,
    /// Content directory to scan.
    pub dir: PathBuf,
    /// Recognized page extensions.
    pub extensions: ExtensionFilter,
    /// Exact file names to leave out of the group.
    pub exclude: Vec<String>,
    /// Page ordering.
    pub order: SidebarOrder,
}

impl SidebarSection {
    /// Create a section scanning `dir` for markdown pages in listing order.
    #[must_use]
    pub fn new(
        route: impl Into<String>,
        title: impl Into<String>,
        dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            route: route.into(),
            title: title.into(),
            dir: dir.into(),
            extensions: ExtensionFilter::markdown(),
            exclude: Vec::new(),
            order: SidebarOrder::Listing,
        }
    }

    /// Replace the recognized extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionFilter) -> Self {
        self.extensions = extensions;
        self
    }

    /// Leave the named files out of the group.
    #[must_use]
    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the page ordering.
    #[must_use]
    pub fn with_order(mut self, order: SidebarOrder) -> Self {
        self.order = order;
        self
    }
}

/// Turns content directory listings into sidebar page lists.
///
/// Every call re-reads the directory through the [`Listing`] capability;
/// nothing is cached between calls.
pub struct SidebarBuilder<'a> {
    listing: &'a dyn Listing,
}

impl<'a> SidebarBuilder<'a> {
    /// Create a builder that lists directories through `listing`.
    #[must_use]
    pub fn new(listing: &'a dyn Listing) -> Self {
        Self { listing }
    }

    /// List the page files directly inside `dir`.
    ///
    /// Keeps an entry iff it is a regular file whose extension is in
    /// `extensions`. Names are returned as listed, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryAccessError`] if `dir` is missing, not a directory,
    /// or unreadable.
    pub fn build_sidebar(
        &self,
        dir: &Path,
        extensions: &ExtensionFilter,
    ) -> Result<Vec<String>, DirectoryAccessError> {
        let entries = self
            .listing
            .list_entries(dir)
            .map_err(|source| DirectoryAccessError {
                path: dir.to_path_buf(),
                source,
            })?;

        let total = entries.len();
        let pages: Vec<String> = entries
            .into_iter()
            .filter(|entry| {
                if !entry.is_file {
                    tracing::trace!(name = %entry.name, "Skipping non-file entry");
                    return false;
                }
                if !extensions.matches(&entry.extension) {
                    tracing::trace!(name = %entry.name, "Skipping unrecognized extension");
                    return false;
                }
                true
            })
            .map(|entry| entry.name)
            .collect();

        tracing::debug!(
            dir = %dir.display(),
            entries = total,
            pages = pages.len(),
            "Scanned content directory"
        );
        Ok(pages)
    }

    /// Build the sidebar group for a section.
    ///
    /// Applies the section's exclusions and ordering on top of
    /// [`build_sidebar`](Self::build_sidebar).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryAccessError`] if the section directory cannot be
    /// listed.
    pub fn build_group(
        &self,
        section: &SidebarSection,
    ) -> Result<SidebarGroup, DirectoryAccessError> {
        let mut pages = self.build_sidebar(&section.dir, &section.extensions)?;

        if !section.exclude.is_empty() {
            pages.retain(|name| !section.exclude.contains(name));
        }
        if section.order == SidebarOrder::Name {
            pages.sort_unstable();
        }

        Ok(SidebarGroup::new(section.title.clone(), pages))
    }
}
