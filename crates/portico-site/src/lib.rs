//! Sidebar navigation and site configuration assembly for Portico.
//!
//! This crate provides:
//! - [`SidebarBuilder`]: scans a content directory and turns its listing into
//!   an ordered list of page identifiers
//! - [`ConfigAssembler`]: combines static site settings with the scanned
//!   sidebar groups into an immutable [`SiteConfig`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use portico_site::{ExtensionFilter, SidebarBuilder};
//! use portico_storage::FsListing;
//!
//! let listing = FsListing::new();
//! let builder = SidebarBuilder::new(&listing);
//! let filter = ExtensionFilter::new([".md"])?;
//!
//! let pages = builder.build_sidebar(Path::new("docs"), &filter)?;
//! # Ok(())
//! # }
//! ```

mod assembler;
mod error;
mod filter;
mod settings;
mod sidebar;

pub use assembler::ConfigAssembler;
pub use error::{DirectoryAccessError, FilterError};
pub use filter::ExtensionFilter;
pub use settings::{HeadTag, NavbarLink, SiteConfig, SiteSettings, ThemeConfig, ThemeSettings};
pub use sidebar::{SidebarBuilder, SidebarGroup, SidebarOrder, SidebarSection};
