//! JSON report writer and reader.
//!
//! Writes the metrics report as pretty-printed JSON; reads it back for
//! the `validate` subcommand and round-trip tests.

use crate::parser::MetricsReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - report data to write
/// * `output_path` - path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - path cannot be created or is invalid
pub fn write_report(
    report: &MetricsReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Serialize a report to a pretty JSON string
///
/// **Public** - used for stdout output and tests
pub fn report_to_string(report: &MetricsReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Read a report from a JSON file
///
/// **Public** - used by the `validate` subcommand
///
/// # Errors
/// * `OutputError::WriteFailed` - file read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<MetricsReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: MetricsReport = serde_json::from_reader(file)
        .map_err(OutputError::SerializationFailed)?;

    Ok(report)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
