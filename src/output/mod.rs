//! Report assembly and output.
//!
//! - `AnalysisReport`, the serializable result of one run
//! - JSON writer and reader
//! - Terminal rendering

pub mod json;
pub mod report;
pub mod text;

pub use json::{read_report, write_report};
pub use report::AnalysisReport;
pub use text::{render_summary, render_text_report};
