// file: src/models/qa_record.rs
// description: timestamped question/answer block generated for one chunk

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    /// Grouping timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// One or more `Q:`/`A:` pairs, kept verbatim.
    pub body: String,
}

impl QaRecord {
    pub fn new(timestamp: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            body: body.into(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.body
            .lines()
            .filter(|line| line.trim_start().starts_with("Q:"))
            .count()
    }
}
