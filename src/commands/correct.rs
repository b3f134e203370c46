//! Correct command implementation.
//!
//! Runs only the auto-corrector and writes the repaired text.

use crate::corrector::{auto_correct, CorrectionResult};
use crate::output::json::prepare_output_path;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Arguments for the correct command
#[derive(Debug, Clone, Default)]
pub struct CorrectArgs {
    /// Trace text file
    pub input: PathBuf,

    /// Where to write the corrected text; stdout when absent
    pub output: Option<PathBuf>,
}

/// Execute the correct command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The correction result; the caller prints `text` when no output file was given
pub fn execute_correct(args: &CorrectArgs) -> Result<CorrectionResult> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read trace file {}", args.input.display()))?;

    let result = auto_correct(&raw);

    if result.is_unchanged() {
        info!("No corrections needed");
    }
    for entry in &result.corrections {
        info!("{}", entry);
    }

    if let Some(path) = &args.output {
        prepare_output_path(path)?;
        fs::write(path, &result.text)
            .with_context(|| format!("Failed to write corrected text to {}", path.display()))?;
        info!("✓ Corrected trace written to: {}", path.display());
    }

    Ok(result)
}
