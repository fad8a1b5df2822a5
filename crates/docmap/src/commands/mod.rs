//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod nav;
pub(crate) mod paths;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docmap_config::{Addressing, CliSettings, Config};
use docmap_site::{AddressingMode, LinkStyle, SiteConfig, SiteState};
use docmap_storage::FsStorage;

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use nav::NavArgs;
pub(crate) use paths::PathsArgs;

/// Arguments shared by every command that loads the site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover docmap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long, env = "DOCMAP_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Manifest file, relative to the source directory (overrides config).
    #[arg(short, long)]
    manifest: Option<String>,

    /// How nested route paths are resolved: absolute or relative (overrides config).
    #[arg(long)]
    addressing: Option<Addressing>,
}

impl SiteArgs {
    /// Load configuration, applying these arguments and an optional output override.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            manifest: self.manifest.clone(),
            output_dir,
            addressing: self.addressing,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Site settings derived from the loaded configuration.
pub(crate) fn site_config(config: &Config) -> SiteConfig {
    SiteConfig {
        manifest_path: config.content_resolved.manifest.clone(),
        addressing: match config.navigation.addressing {
            Addressing::Absolute => AddressingMode::Absolute,
            Addressing::Relative => AddressingMode::Relative,
        },
        links: LinkStyle {
            relative: config.links.relative,
            trailing_slash: config.links.trailing_slash,
        },
    }
}

/// Build the warm site state for the configured content directory.
pub(crate) fn warm_up(config: &Config) -> Result<SiteState, CliError> {
    let storage = Arc::new(FsStorage::new(config.content_resolved.source_dir.clone()));
    Ok(SiteState::warm_up(storage, &site_config(config))?)
}
