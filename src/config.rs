//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.srcsnap.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".srcsnap.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Snapshot settings.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Draw a progress bar while aggregating.
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Snapshot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Artifact format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Write through a temporary file and rename on success.
    #[serde(default)]
    pub atomic: bool,

    /// Files to aggregate, in output order.
    #[serde(default)]
    pub files: Vec<String>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
            atomic: false,
            files: Vec::new(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("output.txt")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.srcsnap.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // A non-empty positional list replaces the configured one wholesale
        if !args.files.is_empty() {
            self.snapshot.files = args.files.clone();
        }

        if let Some(ref output) = args.output {
            self.snapshot.output = output.clone();
        }
        if let Some(format) = args.format {
            self.snapshot.format = format;
        }

        // Flags always override
        if args.atomic {
            self.snapshot.atomic = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
        if args.no_progress || args.quiet {
            self.general.progress = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
