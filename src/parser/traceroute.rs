//! Main parser for captured traceroute text.
//!
//! Turns raw (or auto-corrected) trace output into a `RouteHeader` plus an
//! ordered hop sequence. Unparsable lines are collected as errors and
//! parsing carries on with the next line, so partial results are always
//! available.

use super::schema::{HopRecord, RouteComplexity, RouteHeader, RouteSummary};
use crate::aggregator::ComplexityMetrics;
use crate::utils::config::WILDCARD;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

const HEADER_KEYWORD: &str = "traceroute";
const HEADER_PREFIX: &str = "traceroute to";

static PAREN_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d{1,3}(?:\.\d{1,3}){3})\)")
        .expect("Static regex pattern should always compile")
});

static BARE_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+\.\d+\.\d+\.\d+)\b").expect("Static regex pattern should always compile")
});

static MAX_HOPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s+hops max").expect("Static regex pattern should always compile")
});

// A sample is either "<number>ms" (optional space before the unit) or a lone "*"
static SAMPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\d.]+)\s*ms|\*").expect("Static regex pattern should always compile")
});

/// Result of one parse invocation
///
/// **Public** - consumed by the analyzer and reporting
#[derive(Debug, Clone, Default)]
pub struct ParsedRoute {
    pub header: RouteHeader,
    pub hops: Vec<HopRecord>,

    /// `Line <n>: unknown format - '<line>'` entries
    pub errors: Vec<String>,

    /// Present iff at least one hop was recorded
    pub metrics: Option<ComplexityMetrics>,
}

impl ParsedRoute {
    /// True iff no line failed to parse
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check that hop numbers run exactly `1, 2, ..., count`
    ///
    /// **Public** - explicit structural check, separate from parsing
    ///
    /// # Returns
    /// Zero or one warning; an empty route yields a single "no route data" warning
    pub fn validate_structure(&self) -> Vec<String> {
        if self.hops.is_empty() {
            return vec!["No route data found".to_string()];
        }

        let hop_numbers: Vec<u32> = self.hops.iter().map(|h| h.hop_number).collect();
        let in_sequence = hop_numbers
            .iter()
            .enumerate()
            .all(|(i, &n)| n as usize == i + 1);

        if in_sequence {
            Vec::new()
        } else {
            vec![format!("Hop sequence is broken: {:?}", hop_numbers)]
        }
    }

    /// Build the summary view
    ///
    /// **Public** - for reports
    pub fn summary(&self) -> RouteSummary {
        let all_times: Vec<f64> = self.hops.iter().flat_map(|h| h.present_times()).collect();

        let average_latency_ms = if all_times.is_empty() {
            0.0
        } else {
            all_times.iter().sum::<f64>() / all_times.len() as f64
        };
        let max_latency_ms = all_times.iter().copied().fold(0.0, f64::max);

        let (unique_nodes, is_complex) = self
            .metrics
            .as_ref()
            .map(|m| (m.unique_node_count, m.is_complex))
            .unwrap_or((0, false));

        RouteSummary {
            target_host: self.header.target_host.clone(),
            target_ip: self.header.target_ip.clone(),
            total_hops: self.hops.len(),
            successful_hops: self.hops.iter().filter(|h| h.packet_loss_pct == 0.0).count(),
            timeout_hops: self.hops.iter().filter(|h| h.packet_loss_pct >= 100.0).count(),
            average_latency_ms,
            max_latency_ms,
            parsing_errors: self.errors.len(),
            unique_nodes,
            route_complexity: if is_complex {
                RouteComplexity::High
            } else {
                RouteComplexity::Low
            },
        }
    }
}

/// Parse trace text into a route
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `text` - Raw or auto-corrected traceroute output
///
/// # Returns
/// The parsed route. Lines that are neither a header nor start with a
/// digit are skipped as noise; digit-led lines that cannot be read are
/// recorded in `errors`.
pub fn parse_trace(text: &str) -> ParsedRoute {
    let mut route = ParsedRoute::default();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        let starts_with_digit = line.chars().next().is_some_and(|c| c.is_ascii_digit());
        if !starts_with_digit && !line.starts_with(HEADER_KEYWORD) {
            debug!("Skipping line {}: not a trace line", line_number);
            continue;
        }

        if !parse_line(&mut route, line, line_number) {
            warn!("Line {}: unknown format - '{}'", line_number, line);
            route
                .errors
                .push(format!("Line {}: unknown format - '{}'", line_number, line));
        }
    }

    route.metrics = ComplexityMetrics::compute(&route.hops);

    debug!(
        "Parsed {} hops with {} errors",
        route.hops.len(),
        route.errors.len()
    );

    route
}

/// Dispatch one trimmed, non-blank line
///
/// **Private** - returns false when the line has no recognizable shape
fn parse_line(route: &mut ParsedRoute, line: &str, line_number: usize) -> bool {
    if line.starts_with(HEADER_PREFIX) {
        parse_header(&mut route.header, line);
        return true;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return false;
    }

    let Some(hop_number) = parse_hop_number(parts[0]) else {
        return false;
    };

    let all_wildcards = parts[1..].iter().all(|p| *p == WILDCARD);
    let hop = if (parts.len() == 2 || parts.len() == 4) && all_wildcards {
        HopRecord::timeout(line_number, hop_number)
    } else {
        parse_hop_details(line, line_number, hop_number)
    };

    route.hops.push(hop);
    true
}

/// Read a header line into `header`; never fails
///
/// **Public** - exposed for testing
pub fn parse_header(header: &mut RouteHeader, line: &str) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        debug!("Header too short to read: '{}'", line);
        return;
    }

    header.target_host = Some(parts[2].to_string());

    if let Some(caps) = PAREN_ADDRESS.captures(line) {
        header.target_ip = Some(caps[1].to_string());
    }

    if let Some(max_hops) = MAX_HOPS
        .captures(line)
        .and_then(|caps| caps[1].parse::<u32>().ok())
    {
        header.max_hops = max_hops;
    }

    debug!(
        "Header: target={:?} ip={:?} max_hops={}",
        header.target_host, header.target_ip, header.max_hops
    );
}

fn parse_hop_number(token: &str) -> Option<u32> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// Parse a hop line carrying an address and/or samples
///
/// **Private** - the general form, after the pure-timeout shapes
fn parse_hop_details(line: &str, line_number: usize, hop_number: u32) -> HopRecord {
    let (hostname, ip_address) = extract_endpoint(line);
    let times = extract_samples(line);

    let hostname = hostname
        .or_else(|| ip_address.clone())
        .unwrap_or_else(|| WILDCARD.to_string());

    HopRecord::new(line_number, hop_number, hostname, ip_address, times)
}

/// Find the hop's address and display name
///
/// **Public** - exposed for testing
///
/// # Returns
/// `(hostname, address)`. The hostname is the token right before a
/// parenthesized address (the hop number itself does not count), otherwise
/// the address.
pub fn extract_endpoint(line: &str) -> (Option<String>, Option<String>) {
    if let Some(caps) = PAREN_ADDRESS.captures(line) {
        let (Some(whole), Some(address)) = (caps.get(0), caps.get(1)) else {
            return (None, None);
        };
        let address = address.as_str().to_string();

        let prefix = &line[..whole.start()];
        let hostname = if prefix.ends_with(char::is_whitespace) {
            let tokens: Vec<&str> = prefix.split_whitespace().collect();
            (tokens.len() >= 2).then(|| tokens[tokens.len() - 1].to_string())
        } else {
            None
        };

        return (hostname.or_else(|| Some(address.clone())), Some(address));
    }

    match BARE_ADDRESS.captures(line).map(|caps| caps[1].to_string()) {
        Some(address) if address != "0.0.0.0" => (Some(address.clone()), Some(address)),
        _ => (None, None),
    }
}

/// Extract samples in order of appearance
///
/// **Public** - exposed for testing
///
/// Tokens that fail numeric conversion become absent samples. The list is
/// not padded or truncated here.
pub fn extract_samples(line: &str) -> Vec<Option<f64>> {
    let samples: Vec<Option<f64>> = SAMPLE
        .captures_iter(line)
        .map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()))
        .collect();

    if !samples.is_empty() {
        return samples;
    }

    // Fallback: every bare wildcard is a lost probe
    vec![None; line.matches(WILDCARD).count()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::HopKind;

    const NORMAL_TRACE: &str = "traceroute to google.com (142.250.150.101), 30 hops max, 60 byte packets
 1  192.168.1.1 (192.168.1.1)  1.234 ms  1.456 ms  1.678 ms
 2  10.10.10.1 (10.10.10.1)  5.678 ms  5.789 ms  5.901 ms
 3  72.14.215.25 (72.14.215.25)  15.234 ms  15.456 ms  15.678 ms";

    #[test]
    fn test_parse_normal_trace() {
        let route = parse_trace(NORMAL_TRACE);

        assert!(route.is_success());
        assert_eq!(route.hops.len(), 3);
        assert_eq!(route.header.target_host.as_deref(), Some("google.com"));
        assert_eq!(route.header.target_ip.as_deref(), Some("142.250.150.101"));
        assert_eq!(route.header.max_hops, 30);
        assert_eq!(route.hops[0].times, vec![Some(1.234), Some(1.456), Some(1.678)]);
    }

    #[test]
    fn test_parse_header_short() {
        let mut header = RouteHeader::default();
        parse_header(&mut header, "traceroute to host");
        assert_eq!(header, RouteHeader::default());
    }

    #[test]
    fn test_parse_header_max_hops() {
        let mut header = RouteHeader::default();
        parse_header(&mut header, "traceroute to a.b (1.2.3.4), 64 hops max, 52 byte packets");
        assert_eq!(header.max_hops, 64);
    }

    #[test]
    fn test_timeout_shapes() {
        let route = parse_trace("1  *\n2  *  *  *");

        assert_eq!(route.hops.len(), 2);
        for hop in &route.hops {
            assert_eq!(hop.kind, HopKind::Timeout);
            assert_eq!(hop.hostname, "*");
            assert_eq!(hop.ip_address, None);
            assert_eq!(hop.times, vec![None, None, None]);
        }
    }

    #[test]
    fn test_unknown_format_is_recorded() {
        let route = parse_trace("5\n7x 10.0.0.1 1 ms\n8  10.0.0.2 (10.0.0.2)  1 ms  1 ms  1 ms");

        assert!(!route.is_success());
        assert_eq!(route.errors.len(), 2);
        assert_eq!(route.errors[0], "Line 1: unknown format - '5'");
        assert_eq!(route.hops.len(), 1);
    }

    #[test]
    fn test_noise_lines_are_skipped() {
        let route = parse_trace("invalid traceroute output\nsome random text\n# comment");

        assert!(route.is_success());
        assert!(route.hops.is_empty());
        assert!(route.metrics.is_none());
    }

    #[test]
    fn test_extract_endpoint_hostname() {
        let (host, ip) = extract_endpoint("3  core1.example.net (203.0.113.9)  9.1 ms");
        assert_eq!(host.as_deref(), Some("core1.example.net"));
        assert_eq!(ip.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_extract_endpoint_without_hostname() {
        let (host, ip) = extract_endpoint("3  (203.0.113.9)  9.1 ms");
        assert_eq!(host.as_deref(), Some("203.0.113.9"));
        assert_eq!(ip.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_extract_endpoint_bare_fallback() {
        let (host, ip) = extract_endpoint("4  198.51.100.7  3.0ms");
        assert_eq!(host.as_deref(), Some("198.51.100.7"));
        assert_eq!(ip.as_deref(), Some("198.51.100.7"));

        assert_eq!(extract_endpoint("4  0.0.0.0  3.0ms"), (None, None));
    }

    #[test]
    fn test_extract_samples_keeps_extras() {
        let samples = extract_samples("1  10.0.0.1 (10.0.0.1)  1ms 2ms * 4ms");
        assert_eq!(samples, vec![Some(1.0), Some(2.0), None, Some(4.0)]);
    }

    #[test]
    fn test_unconvertible_sample_is_absent() {
        let samples = extract_samples("1  host  1.2.3ms  2ms");
        assert_eq!(samples, vec![None, Some(2.0)]);
    }

    #[test]
    fn test_validate_structure() {
        assert!(parse_trace(NORMAL_TRACE).validate_structure().is_empty());

        let empty = parse_trace("");
        assert_eq!(empty.validate_structure(), vec!["No route data found".to_string()]);
    }

    #[test]
    fn test_summary() {
        let route = parse_trace(
            "traceroute to t.com (1.2.3.4), 30 hops max, 60 byte packets
 1  192.168.1.1 (192.168.1.1)  1.0 ms  *  3.0 ms
 2  * * *
 3  1.2.3.4 (1.2.3.4)  10.0 ms  10.0 ms  10.0 ms",
        );

        let summary = route.summary();
        assert_eq!(summary.total_hops, 3);
        assert_eq!(summary.successful_hops, 1);
        assert_eq!(summary.timeout_hops, 1);
        assert_eq!(summary.average_latency_ms, 34.0 / 5.0);
        assert_eq!(summary.max_latency_ms, 10.0);
        assert_eq!(summary.unique_nodes, 2);
        assert_eq!(summary.route_complexity, RouteComplexity::Low);
    }

    #[test]
    fn test_summary_of_empty_route() {
        let summary = parse_trace("").summary();
        assert_eq!(summary.total_hops, 0);
        assert_eq!(summary.average_latency_ms, 0.0);
        assert_eq!(summary.route_complexity, RouteComplexity::Low);
    }
}
