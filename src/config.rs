//! Configuration System
//!
//! Layered configuration: built-in defaults, a global
//! `~/.config/sheaf/config.toml`, and a workspace-local `sheaf.toml`.
//! CLI flags are applied on top by the CLI layer.

use crate::error::CompileError;
use crate::logging::LoggingConfig;
use crate::walker::WalkerConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheafConfig {
    /// Source folder to traverse
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Output document path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Traversal settings
    #[serde(default)]
    pub walker: WalkerSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Traversal section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerSettings {
    /// Follow symbolic links during traversal
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Path components to skip (empty: include everything)
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Maximum traversal depth (absent: unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Sort discovered files lexicographically by path
    #[serde(default = "default_true")]
    pub sort: bool,
}

fn default_source() -> PathBuf {
    PathBuf::from("./src")
}

fn default_output() -> PathBuf {
    PathBuf::from("compiled_contents.txt")
}

fn default_true() -> bool {
    true
}

impl Default for WalkerSettings {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore: Vec::new(),
            max_depth: None,
            sort: default_true(),
        }
    }
}

impl Default for SheafConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            walker: WalkerSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl WalkerSettings {
    /// Convert the configuration section into walker settings
    pub fn to_walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore.clone(),
            max_depth: self.max_depth,
            sort_entries: self.sort,
        }
    }
}

impl SheafConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), CompileError> {
        if self.source.as_os_str().is_empty() {
            return Err(CompileError::Config(
                "Source folder cannot be empty".to_string(),
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err(CompileError::Config(
                "Output path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loader: defaults, then global file, then workspace file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all default locations.
    /// Precedence, lowest to highest: built-in defaults, global config file,
    /// workspace `sheaf.toml` in the current directory.
    pub fn load() -> Result<SheafConfig, CompileError> {
        let builder = builder_with_defaults()?;
        let builder = add_global_source(builder);
        let builder = add_workspace_source(builder, Path::new("."));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file over built-in defaults.
    pub fn load_from_file(path: &Path) -> Result<SheafConfig, CompileError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<SheafConfig, CompileError> {
        let config: SheafConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// Create a config builder with defaults applied.
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("source", "./src")?
        .set_default("output", "compiled_contents.txt")
}

/// Path to the global config file.
/// Uses XDG_CONFIG_HOME when set, otherwise ~/.config/sheaf/config.toml.
pub fn global_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("sheaf").join("config.toml"));
    }
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("sheaf")
            .join("config.toml")
    })
}

/// Add the global config file source to the builder if it exists.
fn add_global_source(mut builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            builder = builder.add_source(File::from(global_path).required(false));
        } else {
            debug!(config_path = %global_path.display(), "No global configuration file");
        }
    }
    builder
}

/// Add the workspace config file source to the builder if it exists.
fn add_workspace_source(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let workspace_path = workspace_root.join("sheaf.toml");
    if workspace_path.exists() {
        builder = builder.add_source(File::from(workspace_path).required(false));
    }
    builder
}
