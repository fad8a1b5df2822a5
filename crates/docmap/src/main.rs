//! docmap CLI - Manifest-driven documentation site builder.
//!
//! Provides commands for:
//! - `build`: Resolve every page and write JSON output
//! - `paths`: Print the pre-renderable URL paths
//! - `nav`: Print the navigation tree

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, NavArgs, PathsArgs};
use output::Output;

/// docmap - Manifest-driven documentation site builder.
#[derive(Parser)]
#[command(name = "docmap", version, about)]
struct Cli {
    /// Enable verbose output (info-level logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every page and write the site as JSON.
    Build(BuildArgs),
    /// Print the URL path segments of every page.
    Paths(PathsArgs),
    /// Print the navigation tree.
    Nav(NavArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Paths(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
