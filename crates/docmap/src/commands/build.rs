//! `docmap build` command implementation.
//!
//! Output layout:
//!
//! ```text
//! <output>/paths.json            segment lists of every page
//! <output>/navigation.json       navigation tree
//! <output>/page.json             root page
//! <output>/<url_path>/page.json  every other page
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use docmap_site::{SiteState, StaticPath};
use rayon::prelude::*;
use serde::Serialize;

use super::{SiteArgs, warm_up};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory (default: .docmap/build/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    site: SiteArgs,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(self.output_dir)?;
        let output_dir = config.build_resolved.output_dir.clone();

        output.info(&format!(
            "Source: {}",
            config.content_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", output_dir.display()));

        let state = warm_up(&config)?;
        let pages = write_site(&state, &output_dir)?;

        output.success(&format!(
            "Built {pages} pages (version {}) to {}",
            state.version(),
            output_dir.display()
        ));
        Ok(())
    }
}

/// Resolve every page in parallel and write the site to `output_dir`.
///
/// Returns the number of pages written. Any failing page fails the build.
pub(crate) fn write_site(state: &SiteState, output_dir: &Path) -> Result<usize, CliError> {
    fs::create_dir_all(output_dir)?;

    let paths = state.static_paths();
    let segments: Vec<&[String]> = paths.iter().map(|p| p.segments.as_slice()).collect();
    write_json(&output_dir.join("paths.json"), &segments)?;
    write_json(&output_dir.join("navigation.json"), state.navigation())?;

    paths
        .par_iter()
        .try_for_each(|path| write_page(state, path, output_dir))?;

    Ok(paths.len())
}

fn write_page(state: &SiteState, path: &StaticPath, output_dir: &Path) -> Result<(), CliError> {
    let page = state.resolve(&path.segments)?;
    let file = page_file(output_dir, &path.url_path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    write_json(&file, &page)?;
    tracing::debug!(url_path = %path.url_path, file = %file.display(), "Wrote page");
    Ok(())
}

/// Output file for a URL path.
fn page_file(output_dir: &Path, url_path: &str) -> PathBuf {
    url_path
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(output_dir.to_path_buf(), |dir, segment| dir.join(segment))
        .join("page.json")
}

fn write_json<T: Serialize + ?Sized>(file: &Path, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(file, json)?;
    Ok(())
}
