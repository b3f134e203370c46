//! JSON report writer and reader.

use super::report::AnalysisReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Write a report as pretty JSON
///
/// # Errors
/// * `OutputError::InvalidPath` - Empty path, a directory, or an uncreatable parent
/// * `OutputError::WriteFailed` / `OutputError::SerializationFailed`
pub fn write_report(
    report: &AnalysisReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    prepare_output_path(output_path)?;

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, report)?;

    info!(
        "Report with {} finding(s) written to {}",
        report.findings.len(),
        output_path.display()
    );
    Ok(())
}

/// Check an output path and create its missing parent directories
///
/// Shared by every command that writes a file.
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "{} is a directory",
            path.display()
        )));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            debug!("Creating {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("{}: {}", parent.display(), e))
            })
        }
        _ => Ok(()),
    }
}

/// Load a report written by `write_report`
pub fn read_report(input_path: impl AsRef<Path>) -> Result<AnalysisReport, OutputError> {
    let input_path = input_path.as_ref();
    let report: AnalysisReport = serde_json::from_reader(File::open(input_path)?)?;

    debug!("Loaded {} report from {}", report.version, input_path.display());
    Ok(report)
}
