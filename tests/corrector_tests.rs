use pretty_assertions::assert_eq;
use traceroute_linter::corrector::auto_correct;
use traceroute_linter::parser::{parse_trace, HopKind};

const MESSY_TRACE: &str = "traceroute to example.com (93.184.216.ms34), 30ms hops max
1ms 192.168.1.1 1.2 1.5 ms 1.8
2 10.0.0.1 (10.0.0.2) 5.0ms ms 5.1ms
3 timeout timeout timeout";

#[test]
fn test_messy_trace_is_repaired() {
    let result = auto_correct(MESSY_TRACE);

    assert_eq!(
        result.text,
        "traceroute to example.com (93.184.216.34), 30 hops max
1 192.168.1.1 (192.168.1.1) 1.2ms 1.5ms 1.8ms
2 10.0.0.1 (10.0.0.1) 5.0ms 5.1ms *
3 * * * *"
    );

    assert_eq!(
        result.corrections,
        vec![
            "Line 1: Fixed header: 30 hops",
            "Line 1: Cleaned header IP: 93.184.216.34",
            "Line 2: Removed 'ms' from hop number",
            "Line 2: Added brackets for IP: 192.168.1.1",
            "Line 2: Added 'ms' to time: 1.2",
            "Line 2: Added 'ms' to time: 1.8",
            "Line 3: Fixed brackets for IP: 10.0.0.1",
            "Line 3: Added missing timeout",
            "Line 4: Replaced 'timeout' with '*'",
            "Line 4: Added missing timeout",
        ]
    );
}

#[test]
fn test_correction_is_idempotent() {
    let once = auto_correct(MESSY_TRACE);
    let twice = auto_correct(&once.text);

    assert_eq!(twice.text, once.text);
    assert!(twice.is_unchanged());
}

#[test]
fn test_line_count_preserved() {
    let text = "\n1 10.0.0.1 1ms 2ms 3ms\n\nnote\n";
    let result = auto_correct(text);
    assert_eq!(result.text.split('\n').count(), text.split('\n').count());
}

#[test]
fn test_corrected_text_parses_cleanly() {
    let corrected = auto_correct(MESSY_TRACE);
    let route = parse_trace(&corrected.text);

    assert!(route.is_success());
    assert_eq!(route.header.target_ip.as_deref(), Some("93.184.216.34"));
    assert_eq!(route.hops.len(), 3);
    assert_eq!(route.hops[0].times, vec![Some(1.2), Some(1.5), Some(1.8)]);
    assert_eq!(route.hops[1].kind, HopKind::Partial);
    assert_eq!(route.hops[2].kind, HopKind::Timeout);
    assert!(route.validate_structure().is_empty());
}
