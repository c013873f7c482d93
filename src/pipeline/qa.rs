// file: src/pipeline/qa.rs
// description: drives chunking, timestamping and generation to produce Q&A records
// reference: sequential per-chunk requests behind the rate limiter

use crate::config::Config;
use crate::error::Result;
use crate::extractor::{TimestampResolver, format_timestamp};
use crate::generation::{GenerationClient, RateLimiter};
use crate::models::{Chunk, Document, QaRecord};
use crate::parser::{TextChunker, clean_qa_response};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::utils::PromptTemplate;
use tracing::{debug, info, warn};

/// Records produced for a set of documents, with run counters.
#[derive(Debug, Default)]
pub struct QaRun {
    pub records: Vec<QaRecord>,
    pub stats: PipelineStats,
}

pub struct QaGenerator<'a> {
    client: &'a dyn GenerationClient,
    limiter: &'a dyn RateLimiter,
    chunker: TextChunker,
    resolver: TimestampResolver,
    template: PromptTemplate,
    infer_chunk_timestamps: bool,
    show_progress: bool,
}

impl<'a> QaGenerator<'a> {
    pub fn new(
        client: &'a dyn GenerationClient,
        limiter: &'a dyn RateLimiter,
        chunker: TextChunker,
    ) -> Self {
        Self {
            client,
            limiter,
            chunker,
            resolver: TimestampResolver::new(),
            template: PromptTemplate::qa(),
            infer_chunk_timestamps: false,
            show_progress: false,
        }
    }

    pub fn from_config(
        config: &Config,
        client: &'a dyn GenerationClient,
        limiter: &'a dyn RateLimiter,
    ) -> Self {
        let chunker = TextChunker::new(
            config.chunking.max_words,
            config.chunking.overlap_sentences,
        );
        Self::new(client, limiter, chunker).with_chunk_timestamps(config.qa.infer_chunk_timestamps)
    }

    pub fn with_chunk_timestamps(mut self, enabled: bool) -> Self {
        self.infer_chunk_timestamps = enabled;
        self
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Q&A records for one document, in chunk order.
    pub async fn generate(&self, document: &Document) -> Vec<QaRecord> {
        let chunks = self.chunker.chunk(&document.id, &document.body);
        let tracker = ProgressTracker::hidden(chunks.len());
        self.generate_chunks(document, &chunks, &tracker).await
    }

    /// Process documents one after another, keeping document and chunk order.
    pub async fn generate_all(&self, documents: &[Document]) -> QaRun {
        let chunked: Vec<(&Document, Vec<Chunk>)> = documents
            .iter()
            .map(|doc| (doc, self.chunker.chunk(&doc.id, &doc.body)))
            .collect();
        let total_chunks = chunked.iter().map(|(_, chunks)| chunks.len()).sum::<usize>();

        info!(
            "Generating Q&A for {} document(s), {} chunk(s)",
            documents.len(),
            total_chunks
        );

        let tracker = if self.show_progress {
            ProgressTracker::new(total_chunks)
        } else {
            ProgressTracker::hidden(total_chunks)
        };

        let mut records = Vec::new();
        for (document, chunks) in &chunked {
            records.extend(self.generate_chunks(document, chunks, &tracker).await);
        }

        let stats = tracker.get_stats();
        tracker.finish();

        QaRun { records, stats }
    }

    async fn generate_chunks(
        &self,
        document: &Document,
        chunks: &[Chunk],
        tracker: &ProgressTracker,
    ) -> Vec<QaRecord> {
        let default_timestamp = document.default_timestamp();
        let default_label = format_timestamp(default_timestamp);
        let mut records = Vec::new();

        debug!(
            "Document '{}' ({}) split into {} chunk(s)",
            document.title,
            document.id,
            chunks.len()
        );

        for chunk in chunks {
            tracker.set_message(format!(
                "{} [{}/{}]",
                document.title,
                chunk.sequence_index + 1,
                chunks.len()
            ));

            match self.generate_chunk(chunk, &default_label).await {
                Ok(Some(body)) => {
                    let timestamp = if self.infer_chunk_timestamps {
                        self.resolver.resolve(&chunk.text, default_timestamp)
                    } else {
                        default_label.clone()
                    };
                    records.push(QaRecord::new(timestamp, body));
                    tracker.add_records(1);
                    tracker.inc_processed();
                }
                Ok(None) => {
                    debug!(
                        "Chunk {} of '{}' returned an empty response",
                        chunk.sequence_index, document.title
                    );
                    tracker.inc_empty();
                }
                Err(e) => {
                    warn!(
                        "Q&A generation failed for chunk {} of '{}': {}",
                        chunk.sequence_index, document.title, e
                    );
                    tracker.inc_failed();
                }
            }
        }

        records
    }

    async fn generate_chunk(&self, chunk: &Chunk, default_label: &str) -> Result<Option<String>> {
        let prompt = self
            .template
            .render(&[("text", chunk.text.as_str()), ("timestamp", default_label)]);

        self.limiter.acquire().await;
        let response = self.client.generate(&prompt).await?;

        Ok(clean_qa_response(&response))
    }
}
