//! The individual diagnostic rules.
//!
//! Each `check_*` function is independent: it reads the hops (or their
//! metrics) and appends zero or more findings. The analyzer calls them in
//! a fixed order so reports come out the same every time.

use super::schema::{Finding, FindingKind};
use super::thresholds::{HopThresholds, RouteThresholds};
use crate::aggregator::metrics::ComplexityMetrics;
use crate::geo::GeoLookup;
use crate::parser::schema::{HopKind, HopRecord};
use std::collections::{BTreeSet, HashSet};

/// Slowest sample of each answering hop against the latency limit
pub fn check_high_latency(
    hops: &[HopRecord],
    thresholds: &HopThresholds,
    findings: &mut Vec<Finding>,
) {
    for hop in hops.iter().filter(|h| h.kind != HopKind::Timeout) {
        if let Some(max) = hop.max_time() {
            if max > thresholds.max_latency_ms {
                findings.push(Finding::at_hop(
                    FindingKind::HighLatency,
                    hop.hop_number,
                    format!("High latency: {} ms", max.round()),
                ));
            }
        }
    }
}

pub fn check_packet_loss(
    hops: &[HopRecord],
    thresholds: &HopThresholds,
    findings: &mut Vec<Finding>,
) {
    for hop in hops {
        if hop.packet_loss_pct > thresholds.max_packet_loss_pct {
            findings.push(Finding::at_hop(
                FindingKind::PacketLoss,
                hop.hop_number,
                format!("Packet loss: {}%", hop.packet_loss_pct.round()),
            ));
        }
    }
}

/// First repetition of each address
///
/// An address that comes back a third time is not reported again.
pub fn check_routing_loops(hops: &[HopRecord], findings: &mut Vec<Finding>) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();

    for hop in hops {
        let Some(address) = hop.node_address() else {
            continue;
        };

        if !seen.insert(address) && reported.insert(address) {
            findings.push(Finding::at_hop(
                FindingKind::RoutingLoop,
                hop.hop_number,
                format!("Routing loop: IP {} repeats", address),
            ));
        }
    }
}

/// Whole-route rules derived from the complexity metrics
pub fn check_route_metrics(
    metrics: &ComplexityMetrics,
    thresholds: &RouteThresholds,
    findings: &mut Vec<Finding>,
) {
    if metrics.hop_count > 0
        && (metrics.unique_node_count as f64)
            < thresholds.min_diversity_ratio * metrics.hop_count as f64
    {
        findings.push(Finding::whole_route(
            FindingKind::LowDiversity,
            format!(
                "Low node diversity: {} unique nodes over {} hops",
                metrics.unique_node_count, metrics.hop_count
            ),
        ));
    }

    if metrics.timeout_percentage > thresholds.max_timeout_pct {
        findings.push(Finding::whole_route(
            FindingKind::HighTimeoutRate,
            format!("High timeout rate: {:.1}%", metrics.timeout_percentage),
        ));
    }

    if metrics.average_packet_loss_pct > thresholds.max_average_loss_pct {
        findings.push(Finding::whole_route(
            FindingKind::HighPacketLoss,
            format!(
                "High average packet loss: {:.1}%",
                metrics.average_packet_loss_pct
            ),
        ));
    }

    if metrics.route_change_count > thresholds.max_route_changes {
        findings.push(Finding::whole_route(
            FindingKind::FrequentRouteChanges,
            format!("Frequent route changes: {}", metrics.route_change_count),
        ));
    }

    if metrics.is_complex {
        findings.push(Finding::whole_route(
            FindingKind::ComplexRoute,
            format!(
                "Complex route: {} unique nodes over {} answering hops",
                metrics.unique_node_count, metrics.responding_hop_count
            ),
        ));
    }
}

/// Too many distinct location labels along the route
///
/// The finding points at the highest hop that resolved to a label.
pub fn check_countries(
    hops: &[HopRecord],
    geo: &dyn GeoLookup,
    thresholds: &RouteThresholds,
    findings: &mut Vec<Finding>,
) {
    let mut labels = BTreeSet::new();
    let mut last_hop: u32 = 0;

    for hop in hops {
        let Some(label) = hop.node_address().and_then(|address| geo.lookup(address)) else {
            continue;
        };
        labels.insert(label);
        last_hop = last_hop.max(hop.hop_number);
    }

    if labels.len() > thresholds.max_countries {
        let countries: Vec<String> = labels.into_iter().collect();
        findings.push(
            Finding::at_hop(
                FindingKind::TooManyCountries,
                last_hop,
                format!("Route crosses {} locations: {}", countries.len(), countries.join(", ")),
            )
            .with_countries(countries),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::DisabledGeoLookup;

    fn hop(n: u32, ip: &str, times: [Option<f64>; 3]) -> HopRecord {
        HopRecord::new(n as usize, n, ip, Some(ip.to_string()), times.to_vec())
    }

    #[test]
    fn test_high_latency_rounds_maximum() {
        let hops = vec![
            hop(1, "10.0.0.1", [Some(10.0), Some(12.0), Some(11.0)]),
            hop(2, "10.0.0.2", [Some(199.0), Some(250.6), None]),
        ];

        let mut findings = Vec::new();
        check_high_latency(&hops, &HopThresholds::default(), &mut findings);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].hop_number, 2);
        assert_eq!(findings[0].message, "High latency: 251 ms");
    }

    #[test]
    fn test_packet_loss_over_half() {
        let hops = vec![
            hop(1, "10.0.0.1", [Some(1.0), None, Some(1.0)]),
            hop(2, "10.0.0.2", [Some(1.0), None, None]),
            HopRecord::timeout(3, 3),
        ];

        let mut findings = Vec::new();
        check_packet_loss(&hops, &HopThresholds::default(), &mut findings);

        let at: Vec<u32> = findings.iter().map(|f| f.hop_number).collect();
        assert_eq!(at, vec![2, 3]);
        assert_eq!(findings[0].message, "Packet loss: 67%");
        assert_eq!(findings[1].message, "Packet loss: 100%");
    }

    #[test]
    fn test_routing_loop_reported_once_per_address() {
        let hops = vec![
            hop(1, "10.0.0.1", [Some(1.0); 3]),
            hop(2, "10.0.0.2", [Some(1.0); 3]),
            hop(3, "10.0.0.1", [Some(1.0); 3]),
            hop(4, "10.0.0.1", [Some(1.0); 3]),
            HopRecord::timeout(5, 5),
            HopRecord::timeout(6, 6),
        ];

        let mut findings = Vec::new();
        check_routing_loops(&hops, &mut findings);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].hop_number, 3);
        assert!(findings[0].message.contains("10.0.0.1"));
    }

    #[test]
    fn test_route_metrics_rules() {
        let metrics = ComplexityMetrics {
            hop_count: 10,
            responding_hop_count: 6,
            unique_node_count: 4,
            timeout_percentage: 40.0,
            average_packet_loss_pct: 45.0,
            route_change_count: 6,
            is_complex: true,
        };

        let mut findings = Vec::new();
        check_route_metrics(&metrics, &RouteThresholds::default(), &mut findings);

        let kinds: Vec<FindingKind> = findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::LowDiversity,
                FindingKind::HighTimeoutRate,
                FindingKind::HighPacketLoss,
                FindingKind::FrequentRouteChanges,
                FindingKind::ComplexRoute,
            ]
        );
        assert!(findings.iter().all(|f| f.hop_number == 0));
    }

    #[test]
    fn test_route_metrics_at_limits_are_quiet() {
        let metrics = ComplexityMetrics {
            hop_count: 10,
            responding_hop_count: 8,
            unique_node_count: 8,
            timeout_percentage: 30.0,
            average_packet_loss_pct: 20.0,
            route_change_count: 5,
            is_complex: false,
        };

        let mut findings = Vec::new();
        check_route_metrics(&metrics, &RouteThresholds::default(), &mut findings);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_countries_disabled_lookup_never_fires() {
        let hops: Vec<HopRecord> = (1..=8)
            .map(|n| hop(n, &format!("{}.0.0.1", n * 25), [Some(1.0); 3]))
            .collect();

        let mut findings = Vec::new();
        check_countries(&hops, &DisabledGeoLookup, &RouteThresholds::default(), &mut findings);
        assert!(findings.is_empty());
    }
}
