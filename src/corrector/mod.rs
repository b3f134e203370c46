//! Heuristic repair of malformed traceroute text.
//!
//! This module handles:
//! - Spelled-out timeouts and units leaking into hop numbers or headers
//! - Missing or wrong parenthesized address repetitions
//! - Missing time units and short sample lists
//!
//! Repairs are best-effort. A line no rule understands passes through as-is.

pub mod autocorrect;
pub mod hop_line;
pub mod rules;

// Re-export main types and functions
pub use autocorrect::{auto_correct, correct_line, CorrectionLog, CorrectionResult};
pub use hop_line::process_hop_line;
