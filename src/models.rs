//! Data models for the snapshot aggregator.
//!
//! This module contains the core data structures used throughout
//! the application for representing inputs, sections, and documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A single input path, kept exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileSpec(String);

impl FileSpec {
    /// Creates a new file spec from the supplied path text.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path text as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path for filesystem access.
    pub fn path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Returns the final path component, falling back to the full text
    /// when the path has none (e.g. `..` or `/`).
    pub fn basename(&self) -> String {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileSpec {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FileSpec {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<PathBuf> for FileSpec {
    fn from(path: PathBuf) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

/// Whether a section's file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    /// The file exists and its content was captured.
    Present,
    /// The path did not resolve to a regular file.
    Missing,
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionStatus::Present => write!(f, "present"),
            SectionStatus::Missing => write!(f, "missing"),
        }
    }
}

/// The output unit for one file spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Basename when present, full supplied path when missing.
    pub label: String,
    /// Resolution status.
    pub status: SectionStatus,
    /// Raw file content, only for present sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Section {
    /// Creates a present section labelled with the spec's basename.
    pub fn present(spec: &FileSpec, body: String) -> Self {
        Self {
            label: spec.basename(),
            status: SectionStatus::Present,
            body: Some(body),
        }
    }

    /// Creates a missing section labelled with the full supplied path.
    pub fn missing(spec: &FileSpec) -> Self {
        Self {
            label: spec.as_str().to_string(),
            status: SectionStatus::Missing,
            body: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == SectionStatus::Present
    }

    /// Length of the captured body in bytes (zero when missing).
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, String::len)
    }
}

/// Ordered sequence of sections making up one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub sections: Vec<Section>,
}

impl OutputDocument {
    /// Creates an empty document with room for `capacity` sections.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sections: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary::from_sections(&self.sections)
    }
}

/// Summary statistics over a document's sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    /// Total number of sections.
    pub total: usize,
    /// Number of present sections.
    pub present: usize,
    /// Number of missing sections.
    pub missing: usize,
    /// Sum of present body lengths in bytes.
    pub bytes: usize,
}

impl SnapshotSummary {
    /// Creates a summary from a list of sections.
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut summary = Self {
            total: sections.len(),
            ..Self::default()
        };

        for section in sections {
            if section.is_present() {
                summary.present += 1;
            } else {
                summary.missing += 1;
            }
            summary.bytes += section.body_len();
        }

        summary
    }
}

/// Completion notice for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOutcome {
    /// Destination that was written.
    pub output: PathBuf,
    /// Statistics over the written document.
    pub summary: SnapshotSummary,
}

impl SnapshotOutcome {
    /// Human-readable completion message naming the output path.
    pub fn message(&self) -> String {
        format!("Snapshot '{}' generated successfully.", self.output.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_strips_directories() {
        let spec = FileSpec::from("sub/dir/file.h");
        assert_eq!(spec.basename(), "file.h");
        assert_eq!(FileSpec::from("plain.cpp").basename(), "plain.cpp");
    }

    #[test]
    fn test_basename_falls_back_to_full_path() {
        assert_eq!(FileSpec::from("/").basename(), "/");
        assert_eq!(FileSpec::from("..").basename(), "..");
    }

    #[test]
    fn test_section_labels() {
        let spec = FileSpec::from("src/nav/Mesh.cpp");

        let present = Section::present(&spec, "int x;\n".to_string());
        assert_eq!(present.label, "Mesh.cpp");
        assert!(present.is_present());
        assert_eq!(present.body_len(), 7);

        let missing = Section::missing(&spec);
        assert_eq!(missing.label, "src/nav/Mesh.cpp");
        assert_eq!(missing.status, SectionStatus::Missing);
        assert!(missing.body.is_none());
        assert_eq!(missing.body_len(), 0);
    }

    #[test]
    fn test_snapshot_summary() {
        let a = FileSpec::from("a.h");
        let b = FileSpec::from("b.h");
        let mut doc = OutputDocument::default();
        doc.push(Section::present(&a, "abc".to_string()));
        doc.push(Section::missing(&b));
        doc.push(Section::present(&b, "de".to_string()));

        let summary = doc.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.bytes, 5);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&SectionStatus::Missing).unwrap();
        assert_eq!(json, "\"missing\"");
    }

    #[test]
    fn test_outcome_message_names_output() {
        let outcome = SnapshotOutcome {
            output: PathBuf::from("output.txt"),
            summary: SnapshotSummary::default(),
        };
        assert_eq!(outcome.message(), "Snapshot 'output.txt' generated successfully.");
    }
}
