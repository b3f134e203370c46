//! Configuration and constants for the linter.

use std::time::Duration;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Max hops assumed when the header never states one
pub const DEFAULT_MAX_HOPS: u32 = 30;

/// Probes sent per hop by a standard traceroute run
pub const SAMPLES_PER_HOP: usize = 3;

/// Wildcard used by traceroute for an unanswered probe or unknown host
pub const WILDCARD: &str = "*";

// Plausible round-trip range for a bare token to be treated as a time sample
pub const MIN_PLAUSIBLE_RTT_MS: f64 = 0.01;
pub const MAX_PLAUSIBLE_RTT_MS: f64 = 5000.0;

/// A route is complex when unique nodes fall below this share of responding hops
pub const COMPLEXITY_RATIO: f64 = 0.7;

// Advisory note limits (informational, never findings)
pub const ADVISORY_MEAN_LATENCY_MS: f64 = 100.0;
pub const ADVISORY_MAX_HOPS: usize = 15;

/// Default endpoint for live geolocation (ip-api.com compatible)
pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json";

/// Default timeout for a single live geolocation request
pub const DEFAULT_GEO_TIMEOUT: Duration = Duration::from_secs(2);

// Canonical geography labels
pub const LABEL_PRIVATE: &str = "Private IP";
pub const LABEL_UNKNOWN: &str = "Unknown";
