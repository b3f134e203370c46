//! Rule-based analysis of a parsed route.
//!
//! `RouteAnalyzer` owns the geo collaborator and thresholds and runs the
//! rules in `rules` in a fixed order:
//! latency, packet loss, loops, metric-derived rules, then geography.
//! It never prints and never mutates the route.

pub mod rules;
pub mod schema;
pub mod thresholds;

pub use schema::{Finding, FindingKind};
pub use thresholds::{load_thresholds, AnalyzerThresholds};

use crate::geo::GeoLookup;
use crate::parser::schema::{HopKind, HopRecord};
use crate::parser::ParsedRoute;
use crate::utils::config::{ADVISORY_MAX_HOPS, ADVISORY_MEAN_LATENCY_MS};
use log::{debug, info};
use std::collections::BTreeMap;

/// Rule analyzer bound to one geo lookup
pub struct RouteAnalyzer {
    geo: Box<dyn GeoLookup>,
    thresholds: AnalyzerThresholds,
}

impl RouteAnalyzer {
    /// Create an analyzer with default thresholds
    pub fn new(geo: Box<dyn GeoLookup>) -> Self {
        Self {
            geo,
            thresholds: AnalyzerThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: AnalyzerThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Evaluate every rule against a parsed route
    ///
    /// **Public** - main entry point for analysis
    ///
    /// # Returns
    /// Findings in rule order; empty when nothing is wrong. Whole-route
    /// rules are skipped when the route has no metrics.
    pub fn analyze(&self, route: &ParsedRoute) -> Vec<Finding> {
        let hops = &route.hops;
        let mut findings = Vec::new();

        rules::check_high_latency(hops, &self.thresholds.hop, &mut findings);
        rules::check_packet_loss(hops, &self.thresholds.hop, &mut findings);
        rules::check_routing_loops(hops, &mut findings);

        if let Some(metrics) = &route.metrics {
            rules::check_route_metrics(metrics, &self.thresholds.route, &mut findings);
        }

        rules::check_countries(hops, self.geo.as_ref(), &self.thresholds.route, &mut findings);

        info!("Analysis found {} issue(s) across {} hops", findings.len(), hops.len());
        for finding in &findings {
            debug!("{} at hop {}: {}", finding.kind, finding.hop_number, finding.message);
        }

        findings
    }

    /// Location label of every hop that resolved to one
    pub fn hop_countries(&self, hops: &[HopRecord]) -> BTreeMap<u32, String> {
        hops.iter()
            .filter_map(|hop| {
                let label = self.geo.lookup(hop.node_address()?)?;
                Some((hop.hop_number, label))
            })
            .collect()
    }
}

/// Informational remarks for routes without findings
///
/// Covers the mean per-hop latency, long routes and timed-out hops.
pub fn advisory_notes(hops: &[HopRecord]) -> Vec<String> {
    let mut notes = Vec::new();

    let means: Vec<f64> = hops
        .iter()
        .filter(|h| h.kind != HopKind::Timeout)
        .filter_map(HopRecord::mean_time)
        .collect();

    if !means.is_empty() {
        let average = means.iter().sum::<f64>() / means.len() as f64;
        if average > ADVISORY_MEAN_LATENCY_MS {
            notes.push(format!("High average latency: {:.1} ms", average));
        }
    }

    if hops.len() > ADVISORY_MAX_HOPS {
        notes.push(format!("Many hops: {}", hops.len()));
    }

    let timeouts = hops.iter().filter(|h| h.kind == HopKind::Timeout).count();
    if timeouts > 0 {
        notes.push(format!("Timeouts on {} hop(s)", timeouts));
    }

    notes
}
