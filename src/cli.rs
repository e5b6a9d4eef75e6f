//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// srcsnap - aggregate source files into a single snapshot
///
/// Concatenates an ordered list of files into one text artifact, each
/// file under a `=== name ===` header. Missing files are annotated
/// rather than aborting the run.
///
/// Examples:
///   srcsnap RendererGL.h RendererGL.cpp ViewerApp.h ViewerApp.cpp
///   srcsnap src/GtaNav.cpp src/GtaNavAPI.h -o runtime.txt
///   srcsnap --config runtime.toml --atomic
///   srcsnap --dry-run a.cpp b.cpp
///   srcsnap --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Files to include, in output order
    ///
    /// When given, replaces the `files` list from the configuration file.
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Output file path for the snapshot
    ///
    /// Defaults to the configured output, or output.txt.
    #[arg(short, long, value_name = "FILE", env = "SRCSNAP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write through a temporary file and rename on success
    ///
    /// A failed run then leaves any existing output untouched.
    #[arg(long)]
    pub atomic: bool,

    /// Exit with code 2 if any file was not found
    #[arg(long)]
    pub strict: bool,

    /// Resolve the files and list them without writing the snapshot
    #[arg(long)]
    pub dry_run: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .srcsnap.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate a default .srcsnap.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Output format for the snapshot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text sections (default)
    #[default]
    Text,
    /// JSON manifest
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref output) = self.output {
            if output.is_dir() {
                return Err(format!(
                    "Output path is a directory: {}",
                    output.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
