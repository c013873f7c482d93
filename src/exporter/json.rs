// file: src/exporter/json.rs
// description: json load and export of temporal knowledge graph entries
// reference: https://docs.rs/serde_json/latest/serde_json/ser/struct.PrettyFormatter.html

use crate::error::{PipelineError, Result};
use crate::models::TkgEntry;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const INDENT: &[u8] = b"    ";

/// Pretty JSON with four-space indentation.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| PipelineError::Validation(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct GraphStore {
    path: PathBuf,
}

impl GraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the entry sequence; the document must be a JSON array.
    pub fn load(&self) -> Result<Vec<TkgEntry>> {
        let content = fs::read_to_string(&self.path).map_err(|source| PipelineError::FileOperation {
            path: self.path.clone(),
            source,
        })?;

        match serde_json::from_str::<Value>(&content)? {
            Value::Array(values) => {
                info!("Loaded {} graph entries from {}", values.len(), self.path.display());
                Ok(values.into_iter().map(TkgEntry).collect())
            }
            other => Err(PipelineError::Validation(format!(
                "{} must contain a JSON array, found {}",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    pub fn save(&self, entries: &[TkgEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = to_json_pretty(entries)?;
        fs::write(&self.path, json).map_err(|source| PipelineError::FileOperation {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved {} graph entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
