//! Rule thresholds and their TOML loader.
//!
//! Every key is optional; an empty file gives the built-in defaults.
//!
//! ```toml
//! [hop]
//! max_latency_ms = 150.0
//!
//! [route]
//! max_countries = 6
//! ```

use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete threshold configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyzerThresholds {
    /// Per-hop rules
    #[serde(default)]
    pub hop: HopThresholds,

    /// Whole-route rules
    #[serde(default)]
    pub route: RouteThresholds,
}

/// Thresholds checked against each hop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HopThresholds {
    /// Slowest sample above this is high latency
    pub max_latency_ms: f64,

    /// Per-hop loss above this percentage is reported
    pub max_packet_loss_pct: f64,
}

impl Default for HopThresholds {
    fn default() -> Self {
        Self {
            max_latency_ms: 200.0,
            max_packet_loss_pct: 50.0,
        }
    }
}

/// Thresholds checked against the whole route
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteThresholds {
    /// Distinct nodes below this share of hops is low diversity
    pub min_diversity_ratio: f64,

    pub max_timeout_pct: f64,

    pub max_average_loss_pct: f64,

    pub max_route_changes: usize,

    /// More distinct location labels than this is reported
    pub max_countries: usize,
}

impl Default for RouteThresholds {
    fn default() -> Self {
        Self {
            min_diversity_ratio: 0.5,
            max_timeout_pct: 30.0,
            max_average_loss_pct: 20.0,
            max_route_changes: 5,
            max_countries: 4,
        }
    }
}

impl AnalyzerThresholds {
    /// Reject values no rule can be evaluated against
    ///
    /// # Errors
    /// * `ConfigError::InvalidValue` - Names the first offending key
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hop.max_latency_ms.is_finite() && self.hop.max_latency_ms > 0.0) {
            return Err(invalid("hop.max_latency_ms", self.hop.max_latency_ms));
        }

        let percentages = [
            ("hop.max_packet_loss_pct", self.hop.max_packet_loss_pct),
            ("route.max_timeout_pct", self.route.max_timeout_pct),
            ("route.max_average_loss_pct", self.route.max_average_loss_pct),
        ];
        for (key, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(key, value));
            }
        }

        if !(0.0..=1.0).contains(&self.route.min_diversity_ratio) {
            return Err(invalid(
                "route.min_diversity_ratio",
                self.route.min_diversity_ratio,
            ));
        }

        Ok(())
    }
}

fn invalid(key: &str, value: f64) -> ConfigError {
    ConfigError::InvalidValue(format!("{} = {}", key, value))
}

/// Load thresholds from a TOML file
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Returns
/// Validated thresholds; absent keys keep their defaults
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
/// * `ConfigError::InvalidValue` - If a value is out of range
pub fn load_thresholds(path: impl AsRef<Path>) -> Result<AnalyzerThresholds, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let thresholds: AnalyzerThresholds = toml::from_str(&contents)?;
    thresholds.validate()?;

    debug!("Loaded thresholds from {}: {:?}", path.display(), thresholds);
    Ok(thresholds)
}
