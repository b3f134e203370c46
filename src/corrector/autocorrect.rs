//! Best-effort auto-correction of whole trace transcripts.
//!
//! Each line goes through the rules in `rules` in a fixed order:
//! 1. spelled-out `timeout` -> `*`
//! 2. unit stripped from a leading hop number
//! 3. unit spacing collapsed (silent)
//! 4. header repairs, or hop-line repairs for digit-led lines
//!
//! Leading indentation is kept verbatim. Lines that match no rule come
//! out as they went in.

use super::hop_line::process_hop_line;
use super::rules::{
    clean_header_address, collapse_unit_spacing, fix_header_counts, is_header_line,
    replace_timeout_word, strip_hop_number_unit,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Ordered log of applied repairs, formatted as `Line <n>: <message>`
#[derive(Debug, Clone, Default)]
pub struct CorrectionLog {
    entries: Vec<String>,
}

impl CorrectionLog {
    /// Record one repair on a line
    pub fn note(&mut self, line_number: usize, message: impl Into<String>) {
        let entry = format!("Line {}: {}", line_number, message.into());
        debug!("{}", entry);
        self.entries.push(entry);
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

/// Corrected text plus the repairs that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub text: String,
    pub corrections: Vec<String>,
}

impl CorrectionResult {
    pub fn is_unchanged(&self) -> bool {
        self.corrections.is_empty()
    }
}

/// Auto-correct a full transcript
///
/// **Public** - main entry point for correction
///
/// # Arguments
/// * `text` - Raw traceroute output, possibly hand-transcribed
///
/// # Returns
/// The corrected text (same line count, `\n`-joined) and the full ordered log
pub fn auto_correct(text: &str) -> CorrectionResult {
    let mut log = CorrectionLog::default();

    let lines: Vec<String> = text
        .split('\n')
        .enumerate()
        .map(|(index, line)| correct_line(line, index + 1, &mut log))
        .collect();

    CorrectionResult {
        text: lines.join("\n"),
        corrections: log.into_entries(),
    }
}

/// Correct one line
///
/// **Public** - exposed for line-level use and testing
pub fn correct_line(line: &str, line_number: usize, log: &mut CorrectionLog) -> String {
    let content = line.trim();
    if content.is_empty() {
        return line.to_string();
    }

    let indent = &line[..line.len() - line.trim_start().len()];
    let mut working = fix_obvious_errors(content, line_number, log);

    if is_header_line(&working) {
        working = fix_header(&working, line_number, log);
    } else {
        let tokens: Vec<&str> = working.split_whitespace().collect();
        let is_hop_line = tokens.len() > 1 && tokens[0].chars().all(|c| c.is_ascii_digit());
        if is_hop_line {
            working = process_hop_line(&tokens, line_number, log);
        }
    }

    format!("{}{}", indent, working)
}

/// Repairs applied to every non-blank line before dispatch
fn fix_obvious_errors(content: &str, line_number: usize, log: &mut CorrectionLog) -> String {
    let mut fixed = content.to_string();

    if let Some(replaced) = replace_timeout_word(&fixed) {
        log.note(line_number, "Replaced 'timeout' with '*'");
        fixed = replaced;
    }

    if let Some(stripped) = strip_hop_number_unit(&fixed) {
        log.note(line_number, "Removed 'ms' from hop number");
        fixed = stripped;
    }

    collapse_unit_spacing(&fixed)
}

fn fix_header(content: &str, line_number: usize, log: &mut CorrectionLog) -> String {
    let (mut fixed, repaired) = fix_header_counts(content);
    for value in repaired {
        log.note(line_number, format!("Fixed header: {}", value));
    }

    if let Some((cleaned, address)) = clean_header_address(&fixed) {
        log.note(line_number, format!("Cleaned header IP: {}", address));
        fixed = cleaned;
    }

    fixed
}
