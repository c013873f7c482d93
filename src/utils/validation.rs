// file: src/utils/validation.rs
// description: input validation for file arguments and configuration values
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            PipelineError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(PipelineError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_extension(path: &Path, expected: &[&str]) -> Result<()> {
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| expected.iter().any(|x| x.eq_ignore_ascii_case(ext)));

        if !matches {
            return Err(PipelineError::Validation(format!(
                "Expected a {} file: {}",
                expected.join("/"),
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PipelineError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_row_index(index: usize, rows: usize) -> Result<()> {
        if index >= rows {
            return Err(PipelineError::Validation(format!(
                "Row {} out of range ({} usable rows)",
                index, rows
            )));
        }
        Ok(())
    }

    /// Truncates on a char boundary so multi-byte text never panics.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((byte, _)) => format!("{}...", &text[..byte]),
        }
    }
}
