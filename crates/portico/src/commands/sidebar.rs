//! `portico sidebar` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use portico_site::{ExtensionFilter, SidebarBuilder, SidebarOrder, SidebarSection};
use portico_storage::FsListing;

use crate::error::CliError;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Content directory to scan.
    dir: PathBuf,

    /// Recognized page extension, dot included (repeatable).
    #[arg(short, long = "ext", default_value = ".md")]
    extensions: Vec<String>,

    /// File name to leave out (repeatable).
    #[arg(long)]
    exclude: Vec<String>,

    /// Sort pages by name instead of keeping directory listing order.
    #[arg(long)]
    sort: bool,
}

impl SidebarArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let pages = self.pages()?;

        let mut stdout = std::io::stdout().lock();
        for page in pages {
            writeln!(stdout, "{page}")?;
        }
        Ok(())
    }

    fn pages(&self) -> Result<Vec<String>, CliError> {
        let extensions = ExtensionFilter::new(self.extensions.iter().cloned())?;
        let order = if self.sort {
            SidebarOrder::Name
        } else {
            SidebarOrder::Listing
        };
        let section = SidebarSection::new("/", "", &self.dir)
            .with_extensions(extensions)
            .with_exclude(self.exclude.iter().cloned())
            .with_order(order);

        let listing = FsListing::new();
        let group = SidebarBuilder::new(&listing).build_group(&section)?;
        Ok(group.children)
    }
}
