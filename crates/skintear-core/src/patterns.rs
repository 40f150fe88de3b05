//! Shared input patterns.
//!
//! Risk factor keys and assessment dates arrive as free text from the form
//! collaborator (YAML/JSON documents, CLI flags). The patterns used to
//! recognise them live here so intake and the CLI agree on one grammar.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Positional question key (`q1`, `q14`, ...). No leading zeros, so
    /// `q05` is not an alias of `q5`.
    pub static ref QUESTION_KEY_PATTERN: Regex = Regex::new(
        r"^q([1-9][0-9]*)$"
    ).unwrap();

    /// Day-first date as printed on the form (DD/MM/YYYY, D/M/YYYY accepted).
    pub static ref DAY_FIRST_DATE_PATTERN: Regex = Regex::new(
        r"^\d{1,2}/\d{1,2}/\d{4}$"
    ).unwrap();

    /// ISO calendar date (YYYY-MM-DD).
    pub static ref ISO_DATE_PATTERN: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}$"
    ).unwrap();
}

/// Extract the question number from a positional key.
///
/// Returns the number as written, without range checking: `q15` yields
/// `Some(15)` so callers can report it as an unknown factor.
pub fn question_number(key: &str) -> Option<usize> {
    QUESTION_KEY_PATTERN
        .captures(key)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Check if text looks like a day-first date.
pub fn is_day_first_date(text: &str) -> bool {
    DAY_FIRST_DATE_PATTERN.is_match(text)
}

/// Check if text looks like an ISO date.
pub fn is_iso_date(text: &str) -> bool {
    ISO_DATE_PATTERN.is_match(text)
}
