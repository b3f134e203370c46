//! Terminal rendering of analysis reports.

use super::report::AnalysisReport;
use crate::analyzer::FindingKind;
use crate::parser::schema::{HopKind, HopRecord};
use colored::*;

/// Render a human-readable report for the terminal
pub fn render_text_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    out.push_str(&render_hops(&report.hops));
    out.push_str(&render_problems(report));
    out.push_str(&render_findings(report));
    out.push_str(&render_geography(report));

    out
}

/// Render only the summary block (`--summary`)
pub fn render_summary(report: &AnalysisReport) -> String {
    let mut out = render_header(report);
    out.push_str(&render_status(report));
    out
}

fn render_header(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str("\n🛰  ");
    out.push_str(&"Traceroute Analysis".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Source:  {}\n", report.source));
    out.push_str(&format!(
        "Target:  {} ({})\n",
        summary.target_host.as_deref().unwrap_or("unknown"),
        summary.target_ip.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&format!(
        "Hops:    {} ({} clean, {} timed out)\n",
        summary.total_hops, summary.successful_hops, summary.timeout_hops
    ));
    out.push_str(&format!(
        "Latency: avg {:.1} ms, max {:.1} ms\n",
        summary.average_latency_ms, summary.max_latency_ms
    ));
    out.push_str(&format!(
        "Nodes:   {} unique, complexity {:?}\n",
        summary.unique_nodes, summary.route_complexity
    ));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_hops(hops: &[HopRecord]) -> String {
    let mut out = String::new();
    if hops.is_empty() {
        return out;
    }

    out.push_str("\nHops:\n");
    for hop in hops {
        let line = match (hop.kind, hop.mean_time()) {
            (HopKind::Timeout, _) | (_, None) => {
                format!("  {:>2}. {} timeout (100% loss)", hop.hop_number, "✗".red())
            }
            (_, Some(mean)) => {
                let symbol = if hop.packet_loss_pct == 0.0 {
                    "✓".green()
                } else if hop.packet_loss_pct < 50.0 {
                    "!".yellow()
                } else {
                    "✗".red()
                };
                format!(
                    "  {:>2}. {} {:<15} {:>7.1} ms (loss {:.0}%)",
                    hop.hop_number,
                    symbol,
                    hop.ip_address.as_deref().unwrap_or(&hop.hostname),
                    mean,
                    hop.packet_loss_pct
                )
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn render_problems(report: &AnalysisReport) -> String {
    let mut out = String::new();

    if !report.corrections.is_empty() {
        out.push_str(&format!("\nCorrections applied: {}\n", report.corrections.len()));
        for entry in &report.corrections {
            out.push_str(&format!("  - {}\n", entry));
        }
    }

    for warning in &report.structure_warnings {
        out.push_str(&format!("\n{} {}\n", "Warning:".yellow().bold(), warning));
    }

    if !report.parse_errors.is_empty() {
        out.push_str(&format!(
            "\n{} {} line(s) could not be parsed\n",
            "Errors:".red().bold(),
            report.parse_errors.len()
        ));
        for error in &report.parse_errors {
            out.push_str(&format!("  - {}\n", error));
        }
    }
    out
}

fn render_findings(report: &AnalysisReport) -> String {
    let mut out = String::new();

    if report.findings.is_empty() {
        out.push_str(&format!("\n{}\n", "No critical problems found".green().bold()));
        if !report.notes.is_empty() {
            out.push_str("Notes:\n");
            for note in &report.notes {
                out.push_str(&format!("  - {}\n", note));
            }
        }
        return out;
    }

    out.push_str(&format!(
        "\n{} {}\n",
        "Problems found:".red().bold(),
        report.findings.len()
    ));
    for finding in &report.findings {
        let tag = match finding.kind {
            FindingKind::RoutingLoop => finding.kind.as_str().red(),
            FindingKind::HighLatency => finding.kind.as_str().yellow(),
            _ => finding.kind.as_str().blue(),
        };
        let location = if finding.kind.is_route_level() && finding.hop_number == 0 {
            "route".to_string()
        } else {
            format!("hop {}", finding.hop_number)
        };
        out.push_str(&format!("  [{}] {} ({})\n", tag, finding.message, location));
    }
    out
}

fn render_geography(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let grouped = report.countries_by_label();
    if grouped.is_empty() {
        return out;
    }

    out.push_str("\nGeography:\n");
    for (label, hops) in grouped {
        let hops: Vec<String> = hops.iter().map(u32::to_string).collect();
        out.push_str(&format!("  {}: hops {}\n", label, hops.join(", ")));
    }
    out
}

fn render_status(report: &AnalysisReport) -> String {
    if report.has_findings() {
        format!(
            "{} {} problem(s)\n",
            "Status:".bold(),
            report.findings.len().to_string().red()
        )
    } else {
        format!("{} {}\n", "Status:".bold(), "OK".green())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Finding;
    use crate::parser::parse_trace;
    use std::collections::BTreeMap;

    fn report() -> AnalysisReport {
        colored::control::set_override(false);
        let route = parse_trace(
            "traceroute to example.com (93.184.216.34), 30 hops max\n\
             1 192.168.1.1 (192.168.1.1) 1 ms 1 ms 1 ms\n\
             2 * * *\n",
        );
        AnalysisReport::from_route("trace.txt", &route, Vec::new())
    }

    #[test]
    fn test_render_clean_report_with_notes() {
        let report = report().with_notes(vec!["Timeouts on 1 hop(s)".to_string()]);
        let text = render_text_report(&report);

        assert!(text.contains("Target:  example.com (93.184.216.34)"));
        assert!(text.contains("192.168.1.1"));
        assert!(text.contains("timeout (100% loss)"));
        assert!(text.contains("No critical problems found"));
        assert!(text.contains("Timeouts on 1 hop(s)"));
    }

    #[test]
    fn test_render_findings_and_geography() {
        let mut countries = BTreeMap::new();
        countries.insert(1, "Private IP".to_string());
        countries.insert(3, "Private IP".to_string());

        let mut report = report().with_hop_countries(countries);
        report.findings.push(Finding::at_hop(FindingKind::PacketLoss, 2, "Packet loss: 100%"));
        report
            .findings
            .push(Finding::whole_route(FindingKind::HighTimeoutRate, "High timeout rate: 50.0%"));
        let text = render_text_report(&report);

        assert!(text.contains("Packet loss: 100% (hop 2)"));
        assert!(text.contains("High timeout rate: 50.0% (route)"));
        assert!(text.contains("Private IP: hops 1, 3"));
        assert!(!text.contains("No critical problems found"));
    }

    #[test]
    fn test_render_summary_status() {
        let text = render_summary(&report());
        assert!(text.contains("Status:"));
        assert!(text.contains("OK"));
    }
}
