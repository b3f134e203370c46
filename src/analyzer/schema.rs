//! Finding types produced by the rule analyzer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule tag attached to every finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    HighLatency,
    PacketLoss,
    RoutingLoop,
    LowDiversity,
    HighTimeoutRate,
    HighPacketLoss,
    FrequentRouteChanges,
    ComplexRoute,
    TooManyCountries,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::HighLatency => "high_latency",
            FindingKind::PacketLoss => "packet_loss",
            FindingKind::RoutingLoop => "routing_loop",
            FindingKind::LowDiversity => "low_diversity",
            FindingKind::HighTimeoutRate => "high_timeout_rate",
            FindingKind::HighPacketLoss => "high_packet_loss",
            FindingKind::FrequentRouteChanges => "frequent_route_changes",
            FindingKind::ComplexRoute => "complex_route",
            FindingKind::TooManyCountries => "too_many_countries",
        }
    }

    /// Whether the finding describes the route as a whole
    pub fn is_route_level(&self) -> bool {
        !matches!(
            self,
            FindingKind::HighLatency | FindingKind::PacketLoss | FindingKind::RoutingLoop
        )
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,

    /// Hop the finding points at; `0` means the whole route
    pub hop_number: u32,

    pub message: String,

    /// Distinct location labels (geography rule only), sorted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
}

impl Finding {
    pub fn at_hop(kind: FindingKind, hop_number: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            hop_number,
            message: message.into(),
            countries: None,
        }
    }

    pub fn whole_route(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::at_hop(kind, 0, message)
    }

    pub fn with_countries(mut self, countries: Vec<String>) -> Self {
        self.countries = Some(countries);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_tag() {
        let json = serde_json::to_string(&FindingKind::FrequentRouteChanges).unwrap();
        assert_eq!(json, "\"frequent_route_changes\"");
        assert_eq!(FindingKind::TooManyCountries.to_string(), "too_many_countries");
    }

    #[test]
    fn test_route_level_kinds() {
        assert!(!FindingKind::HighLatency.is_route_level());
        assert!(!FindingKind::RoutingLoop.is_route_level());
        assert!(FindingKind::LowDiversity.is_route_level());
        assert!(FindingKind::TooManyCountries.is_route_level());
    }

    #[test]
    fn test_countries_omitted_when_absent() {
        let finding = Finding::whole_route(FindingKind::ComplexRoute, "Complex route");
        let json = serde_json::to_value(&finding).unwrap();
        assert!(json.get("countries").is_none());
        assert_eq!(json["hop_number"], 0);
    }
}
