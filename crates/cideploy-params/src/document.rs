//! Parameter documents: the user's input list and the resolved parameter
//! file handed to stack creation.

use std::path::Path;

use cideploy_common::error::{DeployError, Result};
use cideploy_common::types::{ParameterEntry, ParameterRecord};

/// Parses a JSON array of `{ParameterKey, ParameterValue}` objects.
///
/// # Errors
///
/// Returns an error if the text is not such an array.
pub fn parse_document(text: &str) -> Result<Vec<ParameterEntry>> {
    let records: Vec<ParameterRecord> = serde_json::from_str(text)?;
    Ok(records.into_iter().map(ParameterEntry::from).collect())
}

/// Loads a parameter document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Vec<ParameterEntry>> {
    tracing::debug!(path = %path.display(), "loading parameter document");
    let text = std::fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
    let entries = parse_document(&text)?;
    tracing::info!(path = %path.display(), count = entries.len(), "parameter document loaded");
    Ok(entries)
}

/// Renders entries as the pretty-printed parameter file, preserving order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_parameter_file(entries: &[ParameterEntry]) -> Result<String> {
    let records: Vec<ParameterRecord> = entries.iter().map(ParameterEntry::to_record).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Writes the parameter file for `entries` to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_parameter_file(entries: &[ParameterEntry], path: &Path) -> Result<()> {
    let rendered = render_parameter_file(entries)?;
    std::fs::write(path, rendered).map_err(|e| DeployError::io(path, e))?;
    tracing::debug!(path = %path.display(), count = entries.len(), "parameter file written");
    Ok(())
}
