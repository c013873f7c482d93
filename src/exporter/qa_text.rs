// file: src/exporter/qa_text.rs
// description: line-oriented text output for Q&A records

use crate::error::{PipelineError, Result};
use crate::models::QaRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `Timestamp: <ts>` line, record body, blank line; repeated per record.
pub fn render_qa_records(records: &[QaRecord]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str("Timestamp: ");
        output.push_str(&record.timestamp);
        output.push('\n');
        output.push_str(&record.body);
        output.push_str("\n\n");
    }
    output
}

#[derive(Debug, Clone)]
pub struct QaTextWriter {
    path: PathBuf,
}

impl QaTextWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn write_records(&self, records: &[QaRecord]) -> Result<()> {
        self.write_text(&render_qa_records(records))?;
        info!("Saved {} Q&A record(s) to {}", records.len(), self.path.display());
        Ok(())
    }

    pub fn write_text(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, text).map_err(|source| PipelineError::FileOperation {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read a previously written Q&A file, trimmed.
pub fn read_qa_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map(|text| text.trim().to_string())
        .map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })
}
