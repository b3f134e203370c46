//! Route data model produced by the hop parser.
//!
//! Records are built once per parse and never mutated afterwards.

use crate::utils::config::{DEFAULT_MAX_HOPS, SAMPLES_PER_HOP, WILDCARD};
use serde::{Deserialize, Serialize};

/// Classification of a hop by how many samples came back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HopKind {
    /// Every sample is missing
    Timeout,
    /// Some, but not all, samples are missing
    Partial,
    /// Every sample is present
    Standard,
}

impl HopKind {
    /// Classify from the number of missing samples out of `total`
    pub fn from_missing(missing: usize, total: usize) -> Self {
        if missing == total {
            HopKind::Timeout
        } else if missing > 0 {
            HopKind::Partial
        } else {
            HopKind::Standard
        }
    }
}

/// One line of the route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopRecord {
    /// 1-based source line (diagnostics only)
    pub line_number: usize,

    /// Hop position as stated in the text
    pub hop_number: u32,

    /// Display name, the address as a string, or `*` when unresolved
    pub hostname: String,

    /// Dotted-quad address, absent when the hop never answered
    pub ip_address: Option<String>,

    /// Round-trip samples in milliseconds; `None` is a lost probe.
    /// Always at least three entries. Extra samples are kept, so a
    /// corrected timeout line (`2 * * * *`) carries four.
    pub times: Vec<Option<f64>>,

    /// Derived from `times`
    pub kind: HopKind,

    /// `100 * missing / samples`
    pub packet_loss_pct: f64,
}

impl HopRecord {
    /// Build a hop, padding `times` to three samples and deriving loss and kind.
    ///
    /// Samples beyond three are kept.
    pub fn new(
        line_number: usize,
        hop_number: u32,
        hostname: impl Into<String>,
        ip_address: Option<String>,
        mut times: Vec<Option<f64>>,
    ) -> Self {
        while times.len() < SAMPLES_PER_HOP {
            times.push(None);
        }

        let missing = times.iter().filter(|t| t.is_none()).count();
        let packet_loss_pct = (missing as f64 / times.len() as f64) * 100.0;
        let kind = HopKind::from_missing(missing, times.len());

        Self {
            line_number,
            hop_number,
            hostname: hostname.into(),
            ip_address,
            times,
            kind,
            packet_loss_pct,
        }
    }

    /// A hop where nothing answered
    pub fn timeout(line_number: usize, hop_number: u32) -> Self {
        Self::new(line_number, hop_number, WILDCARD, None, vec![None; SAMPLES_PER_HOP])
    }

    /// Samples that actually came back
    pub fn present_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().filter_map(|t| *t)
    }

    /// Largest present sample
    pub fn max_time(&self) -> Option<f64> {
        self.present_times().fold(None, |acc, t| match acc {
            Some(m) if m >= t => Some(m),
            _ => Some(t),
        })
    }

    /// Mean of present samples
    pub fn mean_time(&self) -> Option<f64> {
        let (sum, count) = self
            .present_times()
            .fold((0.0, 0usize), |(s, c), t| (s + t, c + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Address usable as a node identity (present and not a wildcard)
    pub fn node_address(&self) -> Option<&str> {
        self.ip_address
            .as_deref()
            .filter(|ip| !ip.is_empty() && *ip != WILDCARD)
    }
}

/// Information taken from the `traceroute to ...` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHeader {
    pub target_host: Option<String>,
    pub target_ip: Option<String>,
    pub max_hops: u32,
}

impl Default for RouteHeader {
    fn default() -> Self {
        Self {
            target_host: None,
            target_ip: None,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

/// Binary complexity label used in summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteComplexity {
    Low,
    High,
}

/// Derived summary view of a parsed route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub target_host: Option<String>,
    pub target_ip: Option<String>,

    /// Number of recorded hops
    pub total_hops: usize,

    /// Hops with 0% loss
    pub successful_hops: usize,

    /// Hops with 100% loss
    pub timeout_hops: usize,

    /// Mean over every present sample of every hop
    pub average_latency_ms: f64,

    /// Max over every present sample of every hop
    pub max_latency_ms: f64,

    pub parsing_errors: usize,
    pub unique_nodes: usize,
    pub route_complexity: RouteComplexity,
}
