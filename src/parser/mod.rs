//! Trace parsing and route data model.
//!
//! This module handles:
//! - Reading the `traceroute to ...` header
//! - Parsing hop lines in their timeout and detailed shapes
//! - Structural validation and the summary view

pub mod schema;
pub mod traceroute;

// Re-export main types
pub use schema::{HopKind, HopRecord, RouteComplexity, RouteHeader, RouteSummary};
pub use traceroute::{parse_trace, ParsedRoute};
