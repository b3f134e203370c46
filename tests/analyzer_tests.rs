use pretty_assertions::assert_eq;
use std::collections::HashMap;
use traceroute_linter::analyzer::{FindingKind, RouteAnalyzer};
use traceroute_linter::geo::{DisabledGeoLookup, GeoLookup, StaticGeoLookup};
use traceroute_linter::parser::parse_trace;

/// Fixed address -> label table
struct TableGeo(HashMap<&'static str, &'static str>);

impl GeoLookup for TableGeo {
    fn lookup(&self, address: &str) -> Option<String> {
        self.0.get(address).map(|label| label.to_string())
    }

    fn name(&self) -> &'static str {
        "table"
    }
}

fn kinds(analyzer: &RouteAnalyzer, text: &str) -> Vec<(FindingKind, u32)> {
    analyzer
        .analyze(&parse_trace(text))
        .into_iter()
        .map(|f| (f.kind, f.hop_number))
        .collect()
}

#[test]
fn test_single_routing_loop() {
    let analyzer = RouteAnalyzer::new(Box::new(StaticGeoLookup::new()));
    let text = "1 192.168.1.1 (192.168.1.1) 1 ms 1 ms 1 ms
2 10.10.10.1 (10.10.10.1) 5 ms 5 ms 5 ms
3 10.10.10.1 (10.10.10.1) 6 ms 6 ms 6 ms
4 93.184.216.34 (93.184.216.34) 20 ms 20 ms 20 ms";

    assert_eq!(kinds(&analyzer, text), vec![(FindingKind::RoutingLoop, 3)]);
}

#[test]
fn test_healthy_route_has_no_findings() {
    let analyzer = RouteAnalyzer::new(Box::new(StaticGeoLookup::new()));
    let text = "1 192.168.1.1 (192.168.1.1) 1 ms 1 ms 1 ms
2 10.10.10.1 (10.10.10.1) 5 ms 5 ms 5 ms
3 93.184.216.34 (93.184.216.34) 20 ms 20 ms 20 ms";

    assert!(kinds(&analyzer, text).is_empty());
}

#[test]
fn test_loop_timeout_and_slow_hop() {
    let analyzer = RouteAnalyzer::new(Box::new(StaticGeoLookup::new()));
    let text = "1 10.0.0.1 (10.0.0.1) 1 ms 1 ms 1 ms
2 10.10.10.1 (10.10.10.1) 5 ms 5 ms 5 ms
3 10.10.10.1 (10.10.10.1) 6 ms 6 ms 6 ms
4 * * *
5 93.184.216.34 (93.184.216.34) 251 ms 260 ms 270 ms";

    let findings = analyzer.analyze(&parse_trace(text));

    assert_eq!(findings.len(), 3);
    assert_eq!(findings[0].kind, FindingKind::HighLatency);
    assert_eq!(findings[0].hop_number, 5);
    assert_eq!(findings[0].message, "High latency: 270 ms");
    assert_eq!(findings[1].kind, FindingKind::PacketLoss);
    assert_eq!(findings[1].hop_number, 4);
    assert_eq!(findings[2].kind, FindingKind::RoutingLoop);
    assert_eq!(findings[2].hop_number, 3);
}

#[test]
fn test_too_many_countries() {
    let geo = TableGeo(HashMap::from([
        ("11.0.0.1", "Germany"),
        ("12.0.0.1", "France"),
        ("13.0.0.1", "Spain"),
        ("14.0.0.1", "Italy"),
        ("15.0.0.1", "Poland"),
    ]));
    let analyzer = RouteAnalyzer::new(Box::new(geo));
    let text = "1 11.0.0.1 (11.0.0.1) 1 ms 1 ms 1 ms
2 12.0.0.1 (12.0.0.1) 1 ms 1 ms 1 ms
3 13.0.0.1 (13.0.0.1) 1 ms 1 ms 1 ms
4 14.0.0.1 (14.0.0.1) 1 ms 1 ms 1 ms
5 15.0.0.1 (15.0.0.1) 1 ms 1 ms 1 ms
6 16.0.0.1 (16.0.0.1) 1 ms 1 ms 1 ms";

    let findings = analyzer.analyze(&parse_trace(text));

    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.kind, FindingKind::TooManyCountries);
    assert_eq!(finding.hop_number, 5);
    assert_eq!(
        finding.countries.as_deref(),
        Some(
            &[
                "France".to_string(),
                "Germany".to_string(),
                "Italy".to_string(),
                "Poland".to_string(),
                "Spain".to_string(),
            ][..]
        )
    );
}

#[test]
fn test_disabled_geo_skips_geography() {
    let analyzer = RouteAnalyzer::new(Box::new(DisabledGeoLookup));
    let text = "1 11.0.0.1 (11.0.0.1) 1 ms 1 ms 1 ms
2 150.0.0.1 (150.0.0.1) 1 ms 1 ms 1 ms
3 201.0.0.1 (201.0.0.1) 1 ms 1 ms 1 ms
4 220.0.0.1 (220.0.0.1) 1 ms 1 ms 1 ms
5 230.0.0.1 (230.0.0.1) 1 ms 1 ms 1 ms";

    assert!(kinds(&analyzer, text).is_empty());
    assert!(analyzer.hop_countries(&parse_trace(text).hops).is_empty());
}

#[test]
fn test_mostly_timeouts_route() {
    let analyzer = RouteAnalyzer::new(Box::new(DisabledGeoLookup));
    let text = "1 10.0.0.1 (10.0.0.1) 1 ms 1 ms 1 ms
2 * * *
3 * * *
4 * * *";

    assert_eq!(
        kinds(&analyzer, text),
        vec![
            (FindingKind::PacketLoss, 2),
            (FindingKind::PacketLoss, 3),
            (FindingKind::PacketLoss, 4),
            (FindingKind::LowDiversity, 0),
            (FindingKind::HighTimeoutRate, 0),
            (FindingKind::HighPacketLoss, 0),
        ]
    );
}
