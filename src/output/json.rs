//! JSON series output writer.
//!
//! Writes parsed series to JSON files so a run can be inspected or
//! re-plotted without the original logs.

use crate::parser::schema::LabeledSeries;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write labeled series to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `series` - Series to write, in legend order
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_series_json(
    series: &[LabeledSeries],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing series to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, series).map_err(OutputError::SerializationFailed)?;

    debug!("Wrote {} series to {}", series.len(), output_path.display());
    Ok(())
}

/// Read labeled series back from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_series_json(input_path: impl AsRef<Path>) -> Result<Vec<LabeledSeries>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading series from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let series = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(series)
}

/// Validate an output path and create its parent directories
///
/// **Internal** - shared by every writer in this module
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
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

    Ok(())
}
