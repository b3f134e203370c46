//! Traceroute Linter
//!
//! Repairs, parses and lints captured traceroute output. It never sends
//! probes itself; it only reads trace text someone already captured.
//!
//! Pipeline: raw text -> `corrector` (optional) -> `parser` ->
//! `aggregator` metrics -> `analyzer` findings -> `output`.
//!
//! This crate provides the core implementation for the
//! `trace-lint` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-lint analyze trace.txt --output report.json
//! trace-lint correct trace.txt
//! ```

pub mod aggregator;
pub mod analyzer;
pub mod commands;
pub mod corrector;
pub mod geo;
pub mod output;
pub mod parser;
pub mod utils;
