//! Aggregation of a parsed hop sequence into route-level metrics.
//!
//! This module reduces hops into:
//! - Node diversity (unique addresses vs hops)
//! - Timeout and packet loss rates
//! - Coarse network boundary crossings

pub mod metrics;

// Re-export main types and functions
pub use metrics::{count_route_changes, count_unique_nodes, ComplexityMetrics};
