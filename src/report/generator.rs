//! Snapshot rendering.
//!
//! This module turns an [`OutputDocument`] into the plain-text snapshot
//! artifact, or into a JSON manifest.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::{OutputDocument, Section, SectionStatus, SnapshotSummary};
use serde::Serialize;

/// Render one section in the text artifact format.
///
/// Present bodies are written verbatim, followed by one blank-line
/// separator. Missing sections carry only their header.
pub fn section_text(section: &Section) -> String {
    match section.status {
        SectionStatus::Present => format!(
            "=== {} ===\n{}\n\n",
            section.label,
            section.body.as_deref().unwrap_or_default()
        ),
        SectionStatus::Missing => format!("=== {} (NOT FOUND) ===\n\n", section.label),
    }
}

/// Generate the complete text artifact.
pub fn generate_text_report(document: &OutputDocument) -> String {
    document.sections.iter().map(section_text).collect()
}

#[derive(Serialize)]
struct JsonSnapshot<'a> {
    summary: SnapshotSummary,
    sections: &'a [Section],
}

/// Generate a JSON manifest with a summary and every section.
pub fn generate_json_report(document: &OutputDocument) -> Result<String> {
    let snapshot = JsonSnapshot {
        summary: document.summary(),
        sections: &document.sections,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Render a document in the requested format.
pub fn render(document: &OutputDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(document)),
        OutputFormat::Json => generate_json_report(document),
    }
}
