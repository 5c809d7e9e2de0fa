//! Portico CLI - documentation portal configuration builder.
//!
//! Provides commands for:
//! - `build`: Assemble the site configuration and emit it as JSON
//! - `sidebar`: Print the sidebar pages found in one content directory

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, SidebarArgs};
use output::Output;

/// Portico - documentation portal configuration builder.
#[derive(Parser)]
#[command(name = "portico", version, about)]
struct Cli {
    /// Enable verbose output (log each scanned content directory).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the site configuration and write it as JSON.
    Build(BuildArgs),
    /// Print the sidebar pages of a single content directory.
    Sidebar(SidebarArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
