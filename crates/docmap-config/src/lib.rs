//! Configuration management for docmap.
//!
//! Parses `docmap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.source_dir`
//! - `content.manifest`
//! - `build.output_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override manifest file name (relative to the source directory).
    pub manifest: Option<String>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override navigation addressing mode.
    pub addressing: Option<Addressing>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docmap.toml";

/// Default content directory, relative to the config directory.
const DEFAULT_SOURCE_DIR: &str = "content";

/// Default manifest file name, relative to the content directory.
const DEFAULT_MANIFEST: &str = "manifest.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Navigation configuration.
    pub navigation: NavigationConfig,
    /// Link rewriting configuration.
    pub links: LinksConfig,
    /// Build output configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    manifest: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Content root; every manifest `path` is relative to it.
    pub source_dir: PathBuf,
    /// Manifest file name, relative to `source_dir`.
    pub manifest: String,
}

impl ContentConfig {
    /// Full path of the manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.source_dir.join(&self.manifest)
    }
}

/// How navigation paths of nested routes are derived.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Addressing {
    /// Every route's `path` is already relative to the content root.
    #[default]
    Absolute,
    /// Child routes are relative to their parent's URL path.
    Relative,
}

impl std::str::FromStr for Addressing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(Self::Absolute),
            "relative" => Ok(Self::Relative),
            other => Err(ConfigError::Validation(format!(
                "navigation.addressing must be \"absolute\" or \"relative\", got \"{other}\""
            ))),
        }
    }
}

/// Navigation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Addressing mode for nested routes.
    pub addressing: Addressing,
}

/// Link rewriting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Rebase intra-site links relative to the current page.
    ///
    /// When `false`, links are emitted as absolute `/a/b` paths.
    pub relative: bool,
    /// Pages are served as directories (`guides/deploy/`).
    pub trailing_slash: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            relative: true,
            trailing_slash: false,
        }
    }
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory receiving resolved pages.
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docmap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(manifest) = &settings.manifest {
            self.content_resolved.manifest.clone_from(manifest);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(addressing) = settings.addressing {
            self.navigation.addressing = addressing;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            navigation: NavigationConfig::default(),
            links: LinksConfig::default(),
            build: BuildConfigRaw::default(),
            content_resolved: ContentConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                manifest: DEFAULT_MANIFEST.to_owned(),
            },
            build_resolved: BuildConfig {
                output_dir: base.join(".docmap/build"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let manifest = &self.content_resolved.manifest;
        require_non_empty(manifest, "content.manifest")?;
        if Path::new(manifest).is_absolute() {
            return Err(ConfigError::Validation(
                "content.manifest must be relative to content.source_dir".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(dir, "content.source_dir")?);
        }
        if let Some(ref manifest) = self.content.manifest {
            self.content.manifest = Some(expand::expand_env(manifest, "content.manifest")?);
        }
        if let Some(ref dir) = self.build.output_dir {
            self.build.output_dir = Some(expand::expand_env(dir, "build.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            source_dir: resolve(self.content.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            manifest: self
                .content
                .manifest
                .clone()
                .unwrap_or_else(|| DEFAULT_MANIFEST.to_owned()),
        };
        self.build_resolved = BuildConfig {
            output_dir: resolve(self.build.output_dir.as_deref(), ".docmap/build"),
        };
    }
}
