//! Repair of a single hop line, token by token.
//!
//! Layout produced: `<hop> [<address> (<address>)|<name>] <sample> <sample> <sample>`.

use super::autocorrect::CorrectionLog;
use super::rules::{clean_address, looks_like_time, normalize_time_unit};
use crate::utils::config::{SAMPLES_PER_HOP, WILDCARD};
use log::debug;

/// Rebuild a hop line from its whitespace-split tokens
///
/// **Public** - used by the line orchestrator and exposed for testing
///
/// # Arguments
/// * `tokens` - Whitespace-split tokens; the first one is the hop number
/// * `line_number` - 1-based position, used only for log entries
/// * `log` - Receives one entry per repair
///
/// # Returns
/// The tokens re-joined with single spaces after repair
pub fn process_hop_line(tokens: &[&str], line_number: usize, log: &mut CorrectionLog) -> String {
    let Some((first, rest)) = tokens.split_first() else {
        return String::new();
    };

    let mut parts = vec![normalize_hop_number(first, line_number, log)];
    let mut remaining = rest;

    if let Some((candidate, after)) = remaining.split_first() {
        remaining = after;
        match clean_address(candidate) {
            Some(address) => {
                if address != *candidate {
                    log.note(line_number, format!("Cleaned address: {}", address));
                }
                remaining = repair_address_pair(&address, remaining, line_number, log, &mut parts);
            }
            // Hostname or placeholder: kept verbatim
            None => parts.push(candidate.to_string()),
        }
    }

    let mut samples: Vec<String> = remaining
        .iter()
        .map(|token| normalize_sample(token, line_number, log))
        .collect();

    pad_samples(&mut samples, line_number, log);

    parts.extend(samples);
    parts.join(" ")
}

fn normalize_hop_number(token: &str, line_number: usize, log: &mut CorrectionLog) -> String {
    match token.strip_suffix("ms") {
        Some(number) => {
            log.note(line_number, format!("Cleaned hop number: {}", number));
            number.to_string()
        }
        None => token.to_string(),
    }
}

/// Push `address (address)`, fixing or adding the parenthesized repetition
///
/// # Returns
/// Tokens left after the address pair
fn repair_address_pair<'a, 'b>(
    address: &str,
    remaining: &'a [&'b str],
    line_number: usize,
    log: &mut CorrectionLog,
    parts: &mut Vec<String>,
) -> &'a [&'b str] {
    parts.push(address.to_string());
    let repetition = format!("({})", address);

    match remaining.split_first() {
        Some((token, after)) if is_parenthesized(token) => {
            if token.trim_start_matches('(').trim_end_matches(')') != address {
                log.note(line_number, format!("Fixed brackets for IP: {}", address));
            }
            parts.push(repetition);
            after
        }
        _ => {
            log.note(line_number, format!("Added brackets for IP: {}", address));
            parts.push(repetition);
            remaining
        }
    }
}

fn is_parenthesized(token: &str) -> bool {
    token.starts_with('(') && token.ends_with(')')
}

/// Normalize one sample token
///
/// Wildcards and unrecognized tokens pass through; times get exactly one `ms`.
fn normalize_sample(token: &str, line_number: usize, log: &mut CorrectionLog) -> String {
    if token == WILDCARD || !looks_like_time(token) {
        return token.to_string();
    }

    let (normalized, unit_was_missing) = normalize_time_unit(token);
    if unit_was_missing {
        log.note(line_number, format!("Added 'ms' to time: {}", token));
    }
    normalized
}

/// Right-pad short sample lists with wildcards
///
/// Padding only happens when both the sample list and its non-wildcard
/// entries fall short of three.
fn pad_samples(samples: &mut Vec<String>, line_number: usize, log: &mut CorrectionLog) {
    let answered = samples.iter().filter(|s| *s != WILDCARD).count();
    if answered >= SAMPLES_PER_HOP || samples.len() >= SAMPLES_PER_HOP {
        return;
    }

    debug!("Line {}: padding {} samples", line_number, samples.len());
    while samples.len() < SAMPLES_PER_HOP {
        samples.push(WILDCARD.to_string());
        log.note(line_number, "Added missing timeout");
    }
}
