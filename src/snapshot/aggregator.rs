//! Snapshot aggregation.
//!
//! The [`Aggregator`] walks an ordered list of file specs once, captures
//! each file that exists, records the ones that don't, and serializes the
//! resulting [`OutputDocument`] to the destination.

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{Result, SnapshotError};
use crate::models::{FileSpec, OutputDocument, Section, SnapshotOutcome};
use crate::report;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// How the destination is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Create the destination up front and write each section as it is
    /// resolved. A fatal read leaves the earlier sections in place.
    #[default]
    Streaming,
    /// Build the whole document in memory, then replace the destination
    /// through a temporary file. A fatal read leaves the destination as it was.
    Atomic,
}

/// Configuration for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Files to aggregate, in output order.
    pub files: Vec<FileSpec>,
    /// Destination of the snapshot.
    pub output: PathBuf,
    /// Artifact format.
    pub format: OutputFormat,
    /// Destination write strategy.
    pub write_mode: WriteMode,
    /// Whether to draw a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            output: PathBuf::from("output.txt"),
            format: OutputFormat::Text,
            write_mode: WriteMode::Streaming,
            show_progress: false,
        }
    }
}

impl From<&Config> for AggregatorConfig {
    fn from(config: &Config) -> Self {
        Self {
            files: config
                .snapshot
                .files
                .iter()
                .map(|f| FileSpec::from(f.clone()))
                .collect(),
            output: config.snapshot.output.clone(),
            format: config.snapshot.format,
            write_mode: if config.snapshot.atomic {
                WriteMode::Atomic
            } else {
                WriteMode::Streaming
            },
            show_progress: config.general.progress,
        }
    }
}

/// Single-pass source snapshot aggregator.
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create a new aggregator.
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Resolve one file spec into a section.
    ///
    /// Anything that is not a regular file (nonexistent, a directory, or
    /// unreachable metadata) becomes a missing section. Failing to read or
    /// decode an existing file is fatal.
    pub fn resolve(spec: &FileSpec) -> Result<Section> {
        let path = spec.path();

        if !path.is_file() {
            debug!("Not found: {}", spec);
            return Ok(Section::missing(spec));
        }

        let bytes = fs::read(path).map_err(|source| SnapshotError::Read {
            path: spec.to_string(),
            source,
        })?;
        let body = String::from_utf8(bytes).map_err(|source| SnapshotError::Decode {
            path: spec.to_string(),
            source,
        })?;

        debug!("Captured {} ({} bytes)", spec, body.len());
        Ok(Section::present(spec, body))
    }

    /// Resolve every file spec in order without touching the destination.
    pub fn collect(&self) -> Result<OutputDocument> {
        self.scan(|_| Ok(()))
    }

    /// Run the aggregation and write the snapshot to the destination.
    pub fn generate(&self) -> Result<SnapshotOutcome> {
        let output = &self.config.output;
        debug!(
            "Generating snapshot of {} files into {} ({:?}, {:?})",
            self.config.files.len(),
            output.display(),
            self.config.format,
            self.config.write_mode
        );

        let document = match (self.config.write_mode, self.config.format) {
            (WriteMode::Streaming, OutputFormat::Text) => self.write_streaming()?,
            (WriteMode::Streaming, format) => {
                let document = self.collect()?;
                let contents = report::render(&document, format)?;
                fs::write(output, contents).map_err(|e| SnapshotError::write(output, e))?;
                document
            }
            (WriteMode::Atomic, format) => {
                let document = self.collect()?;
                let contents = report::render(&document, format)?;
                write_atomic(output, &contents)?;
                document
            }
        };
        debug!("Wrote {} sections to {}", document.len(), output.display());

        Ok(SnapshotOutcome {
            output: output.clone(),
            summary: document.summary(),
        })
    }

    /// Stream sections into the destination as they are resolved.
    fn write_streaming(&self) -> Result<OutputDocument> {
        let output = &self.config.output;
        let file = File::create(output).map_err(|e| SnapshotError::write(output, e))?;
        let mut writer = BufWriter::new(file);

        // On a fatal read `writer` is dropped, which flushes the sections
        // written so far and closes the file.
        let document = self.scan(|section| {
            writer
                .write_all(report::section_text(section).as_bytes())
                .map_err(|e| SnapshotError::write(output, e))
        })?;

        writer.flush().map_err(|e| SnapshotError::write(output, e))?;
        Ok(document)
    }

    /// Single ordered pass over the file specs, handing each section to
    /// `on_section` before moving to the next.
    fn scan<F>(&self, mut on_section: F) -> Result<OutputDocument>
    where
        F: FnMut(&Section) -> Result<()>,
    {
        let files = &self.config.files;
        let mut document = OutputDocument::with_capacity(files.len());
        let progress = self.progress_bar();

        for spec in files {
            if let Some(ref pb) = progress {
                pb.set_message(spec.basename());
            }

            let resolved = Self::resolve(spec).and_then(|section| {
                on_section(&section)?;
                Ok(section)
            });

            match resolved {
                Ok(section) => document.push(section),
                Err(e) => {
                    if let Some(pb) = progress {
                        pb.finish_and_clear();
                    }
                    return Err(e);
                }
            }

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(document)
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if !self.config.show_progress || self.config.files.is_empty() {
            return None;
        }

        let pb = ProgressBar::new(self.config.files.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    }
}

/// Replace `output` with `contents` via a temporary file in the same directory.
///
/// An existing destination keeps its permissions.
fn write_atomic(output: &Path, contents: &str) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| SnapshotError::write(output, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| SnapshotError::write(output, e))?;

    if let Ok(metadata) = fs::metadata(output) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| SnapshotError::write(output, e))?;
    }

    temp.persist(output)
        .map_err(|e| SnapshotError::write(output, e.error))?;

    Ok(())
}
