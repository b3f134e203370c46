//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod correct;

pub use analyze::{execute_analyze, validate_args, AnalyzeArgs};
pub use correct::{execute_correct, CorrectArgs};
