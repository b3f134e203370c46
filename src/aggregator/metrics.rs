//! Route complexity metrics computed over a finished hop sequence.
//!
//! These are side-effect-free reductions: the same hops always give the
//! same metrics, and nothing here looks at the source text.

use crate::parser::schema::{HopKind, HopRecord};
use crate::utils::config::COMPLEXITY_RATIO;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Statistics derived once per successful parse
///
/// **Public** - consumed by the analyzer and the summary view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Number of recorded hops
    pub hop_count: usize,

    /// Hops that reported an address
    pub responding_hop_count: usize,

    /// Distinct non-wildcard addresses
    pub unique_node_count: usize,

    /// `100 * timeouts / hop_count`
    pub timeout_percentage: f64,

    /// Mean of per-hop packet loss
    pub average_packet_loss_pct: f64,

    /// Adjacent address pairs whose first octet differs
    pub route_change_count: usize,

    /// Few distinct nodes relative to the responding hops
    pub is_complex: bool,
}

impl ComplexityMetrics {
    /// Compute metrics for a hop sequence
    ///
    /// **Public** - main entry point for metrics calculation
    ///
    /// # Returns
    /// `None` when there are no hops, since every ratio would be undefined
    pub fn compute(hops: &[HopRecord]) -> Option<Self> {
        if hops.is_empty() {
            return None;
        }

        let hop_count = hops.len();
        let responding_hop_count = hops.iter().filter(|h| h.node_address().is_some()).count();
        let unique_node_count = count_unique_nodes(hops);

        let timeouts = hops.iter().filter(|h| h.kind == HopKind::Timeout).count();
        let timeout_percentage = (timeouts as f64 / hop_count as f64) * 100.0;

        let average_packet_loss_pct =
            hops.iter().map(|h| h.packet_loss_pct).sum::<f64>() / hop_count as f64;

        let route_change_count = count_route_changes(hops);

        // Timeouts carry no node, so they stay out of the denominator
        let is_complex =
            (unique_node_count as f64) < COMPLEXITY_RATIO * responding_hop_count as f64;

        let metrics = Self {
            hop_count,
            responding_hop_count,
            unique_node_count,
            timeout_percentage,
            average_packet_loss_pct,
            route_change_count,
            is_complex,
        };

        debug!("Route metrics: {}", metrics.summary());

        Some(metrics)
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Hops: {} | Unique nodes: {} | Timeouts: {:.1}% | Avg loss: {:.1}% | Route changes: {} | Complex: {}",
            self.hop_count,
            self.unique_node_count,
            self.timeout_percentage,
            self.average_packet_loss_pct,
            self.route_change_count,
            self.is_complex
        )
    }
}

/// Count distinct node addresses
///
/// **Public** - reusable on any hop slice
pub fn count_unique_nodes(hops: &[HopRecord]) -> usize {
    hops.iter()
        .filter_map(HopRecord::node_address)
        .collect::<HashSet<_>>()
        .len()
}

/// Count adjacent hop pairs that look like a network boundary crossing
///
/// Both hops must carry an address; the comparison only looks at the
/// leading dotted segment.
pub fn count_route_changes(hops: &[HopRecord]) -> usize {
    hops.windows(2)
        .filter(|pair| match (pair[0].node_address(), pair[1].node_address()) {
            (Some(a), Some(b)) => first_segment(a) != first_segment(b),
            _ => false,
        })
        .count()
}

fn first_segment(address: &str) -> &str {
    address.split('.').next().unwrap_or(address)
}
