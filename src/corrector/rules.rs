//! Independent repair rules for a single line of trace text.
//!
//! Each rule works on already-trimmed content and either reports the
//! repaired text or leaves the line alone. The orchestrator in
//! `autocorrect` decides the order and writes the log entries; nothing
//! here knows about line numbers.

use crate::utils::config::{MAX_PLAUSIBLE_RTT_MS, MIN_PLAUSIBLE_RTT_MS, WILDCARD};
use once_cell::sync::Lazy;
use regex::Regex;

const TIME_UNIT: &str = "ms";

static TIMEOUT_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)timeout").expect("Static regex pattern should always compile")
});

static HOP_NUMBER_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)ms\b").expect("Static regex pattern should always compile")
});

static DUPLICATE_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ms\s+ms\b").expect("Static regex pattern should always compile")
});

static SPACED_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+ms\b").expect("Static regex pattern should always compile")
});

static HEADER_COUNT_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)ms(\s+)(hops|byte)")
        .expect("Static regex pattern should always compile")
});

static PAREN_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([^)]+)\)").expect("Static regex pattern should always compile")
});

static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$")
        .expect("Static regex pattern should always compile")
});

/// Replace a spelled-out `timeout` with the wildcard
///
/// Only applies when the line has no `*` yet.
pub fn replace_timeout_word(line: &str) -> Option<String> {
    if line.contains(WILDCARD) || !TIMEOUT_WORD.is_match(line) {
        return None;
    }
    Some(TIMEOUT_WORD.replace_all(line, WILDCARD).into_owned())
}

/// Drop a unit suffix glued to a leading hop number (`5ms ...` -> `5 ...`)
pub fn strip_hop_number_unit(line: &str) -> Option<String> {
    if !HOP_NUMBER_UNIT.is_match(line) {
        return None;
    }
    Some(HOP_NUMBER_UNIT.replace(line, "$1").into_owned())
}

/// Glue detached units to their value and collapse `ms ms`
///
/// Silent normalization: `"30.1 ms"` -> `"30.1ms"`, `"30.1ms ms"` -> `"30.1ms"`.
pub fn collapse_unit_spacing(line: &str) -> String {
    let deduplicated = DUPLICATE_UNIT.replace_all(line, TIME_UNIT);
    SPACED_UNIT.replace_all(&deduplicated, TIME_UNIT).into_owned()
}

/// Whether a line is a traceroute header
pub fn is_header_line(line: &str) -> bool {
    line.to_lowercase().contains("traceroute")
}

/// Strip a unit that leaked in front of `hops` or `byte` in a header
///
/// # Returns
/// The repaired line and one clean value per repair (e.g. `"30 hops"`)
pub fn fix_header_counts(line: &str) -> (String, Vec<String>) {
    let repaired: Vec<String> = HEADER_COUNT_UNIT
        .captures_iter(line)
        .map(|caps| format!("{} {}", &caps[1], &caps[3]))
        .collect();

    if repaired.is_empty() {
        return (line.to_string(), repaired);
    }

    let fixed = HEADER_COUNT_UNIT.replace_all(line, "$1$2$3").into_owned();
    (fixed, repaired)
}

/// Remove a stray unit from the parenthesized header address
///
/// # Returns
/// The repaired line and the clean address
pub fn clean_header_address(line: &str) -> Option<(String, String)> {
    let caps = PAREN_TOKEN.captures(line)?;
    let inner = &caps[1];
    if !inner.contains(TIME_UNIT) {
        return None;
    }

    let clean = inner.replace(TIME_UNIT, "");
    let fixed = line.replacen(&format!("({})", inner), &format!("({})", clean), 1);
    Some((fixed, clean))
}

/// Validate a dotted-quad address, ignoring embedded units
///
/// # Returns
/// The cleaned address if every octet is in `0..=255`
pub fn clean_address(text: &str) -> Option<String> {
    if text.is_empty() || text == WILDCARD {
        return None;
    }

    let clean = text.replace(TIME_UNIT, "");
    if !DOTTED_QUAD.is_match(&clean) {
        return None;
    }

    clean
        .split('.')
        .all(|octet| octet.parse::<u8>().is_ok())
        .then_some(clean)
}

/// Whether a token plausibly holds a round-trip time
///
/// Non-numeric characters are ignored; the value must be in
/// `[0.01, 5000]` ms.
pub fn looks_like_time(text: &str) -> bool {
    if text.is_empty() || text == WILDCARD {
        return false;
    }

    let without_unit = text.strip_suffix(TIME_UNIT).unwrap_or(text);
    let numeric: String = without_unit
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match numeric.parse::<f64>() {
        Ok(value) => (MIN_PLAUSIBLE_RTT_MS..=MAX_PLAUSIBLE_RTT_MS).contains(&value),
        Err(_) => false,
    }
}

/// Give a time token exactly one trailing `ms`
///
/// # Returns
/// The normalized token and whether a missing unit was added
pub fn normalize_time_unit(text: &str) -> (String, bool) {
    let mut base = text;
    while let Some(stripped) = base.strip_suffix(TIME_UNIT) {
        base = stripped;
    }

    let unit_was_missing = base.len() == text.len();
    (format!("{}{}", base, TIME_UNIT), unit_was_missing)
}
