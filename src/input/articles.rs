// file: src/input/articles.rs
// description: article rows from csv exports into documents
// reference: https://docs.rs/csv

use crate::error::{PipelineError, Result};
use crate::extractor::TimestampResolver;
use crate::models::Document;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct ArticleRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "date_str")]
    date: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default)]
pub struct ArticleReader {
    resolver: TimestampResolver,
}

impl ArticleReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_path(&self, path: &Path) -> Result<Vec<Document>> {
        info!("Loading articles from {}", path.display());
        let file = File::open(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(file)
    }

    /// Rows without text are skipped; an unusable date becomes `None`.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<Document>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if !headers.iter().any(|h| h == "text") {
            return Err(PipelineError::Validation(
                "article csv has no 'text' column".to_string(),
            ));
        }

        let mut documents = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in csv_reader.deserialize::<ArticleRow>().enumerate() {
            let row = row?;

            let Some(body) = row.text.filter(|t| !t.trim().is_empty()) else {
                debug!("Skipping row {}: missing text", index);
                skipped += 1;
                continue;
            };

            let published_at = row
                .date
                .as_deref()
                .and_then(|value| self.resolver.parse_published(value));

            if published_at.is_none()
                && let Some(raw) = row.date.as_deref().filter(|d| !d.trim().is_empty())
            {
                warn!("Row {}: unparseable date '{}', using current time", index, raw);
            }

            documents.push(Document::new(
                row.title.unwrap_or_default(),
                published_at,
                body,
            ));
        }

        info!(
            "Loaded {} article(s), skipped {} without text",
            documents.len(),
            skipped
        );
        Ok(documents)
    }
}
