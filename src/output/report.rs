//! The analysis report handed to writers and renderers.

use crate::analyzer::Finding;
use crate::parser::schema::{HopRecord, RouteHeader, RouteSummary};
use crate::parser::ParsedRoute;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything one analysis run produced
///
/// **Public** - serialized as the JSON report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Report schema version
    pub version: String,

    /// Input file the trace came from
    pub source: String,

    pub header: RouteHeader,
    pub summary: RouteSummary,
    pub hops: Vec<HopRecord>,

    /// Hop-numbering problems found after parsing
    pub structure_warnings: Vec<String>,

    /// Lines the parser could not read
    pub parse_errors: Vec<String>,

    /// Repairs applied before parsing; empty when correction was skipped
    pub corrections: Vec<String>,

    pub findings: Vec<Finding>,

    /// Informational remarks, only filled when there are no findings
    pub notes: Vec<String>,

    /// Hop number -> location label
    pub hop_countries: BTreeMap<u32, String>,

    /// ISO 8601 timestamp
    pub generated_at: String,
}

impl AnalysisReport {
    /// Assemble a report from a parsed route and its findings
    pub fn from_route(
        source: impl Into<String>,
        route: &ParsedRoute,
        findings: Vec<Finding>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            header: route.header.clone(),
            summary: route.summary(),
            hops: route.hops.clone(),
            structure_warnings: route.validate_structure(),
            parse_errors: route.errors.clone(),
            corrections: Vec::new(),
            findings,
            notes: Vec::new(),
            hop_countries: BTreeMap::new(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_corrections(mut self, corrections: Vec<String>) -> Self {
        self.corrections = corrections;
        self
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_hop_countries(mut self, hop_countries: BTreeMap<u32, String>) -> Self {
        self.hop_countries = hop_countries;
        self
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Group hop numbers by location label
    pub fn countries_by_label(&self) -> BTreeMap<&str, Vec<u32>> {
        let mut grouped: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
        for (hop, label) in &self.hop_countries {
            grouped.entry(label.as_str()).or_default().push(*hop);
        }
        grouped
    }
}
