// file: src/extractor/patterns.rs
// description: compiled regex patterns for date extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Day-first or ISO dates; the ISO form may carry a time of day
    pub static ref DATE_CANDIDATE: Regex = Regex::new(
        r"\b(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{2}-\d{2}(?:[ T]\d{2}:\d{2}(?::\d{2})?)?)\b"
    ).expect("DATE_CANDIDATE regex is valid");

    pub static ref TIMESTAMP_LINE: Regex = Regex::new(
        r"^\s*Timestamp\b"
    ).expect("TIMESTAMP_LINE regex is valid");
}

/// All date-shaped substrings of `text`, in order of appearance.
pub fn date_candidates(text: &str) -> impl Iterator<Item = &str> {
    DATE_CANDIDATE.find_iter(text).map(|m| m.as_str())
}

pub fn is_timestamp_line(line: &str) -> bool {
    TIMESTAMP_LINE.is_match(line)
}
