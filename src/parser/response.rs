// file: src/parser/response.rs
// description: cleanup of textual Q&A responses

use crate::extractor::patterns::is_timestamp_line;

/// Trim a Q&A response and drop a duplicated leading timestamp header.
///
/// Returns `None` for an empty response. When the first two lines both start
/// with `Timestamp`, the first one is an echoed header and is removed; all
/// other lines are kept verbatim.
pub fn clean_qa_response(response: &str) -> Option<String> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut lines = trimmed.lines();
    let first = lines.next().unwrap_or_default();
    let second = lines.next();

    match second {
        Some(second) if is_timestamp_line(first) && is_timestamp_line(second) => {
            let rest = trimmed
                .split_once('\n')
                .map(|(_, rest)| rest)
                .unwrap_or_default();
            Some(rest.to_string())
        }
        _ => Some(trimmed.to_string()),
    }
}
