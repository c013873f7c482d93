// file: src/pipeline/refiner.rs
// description: batch-wise correction of knowledge graph entries with per-batch fallback
// reference: a failed batch keeps its original entries and never affects its siblings

use crate::error::{PipelineError, Result};
use crate::exporter::to_json_pretty;
use crate::generation::{GenerationClient, RateLimiter};
use crate::models::{Batch, TkgEntry, batches};
use crate::parser::{ParseFailure, extract_json_array};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::utils::PromptTemplate;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum BatchFailure {
    #[error(transparent)]
    Request(#[from] PipelineError),

    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Refined { corrected: usize },
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub range: Range<usize>,
    pub outcome: BatchOutcome,
}

impl BatchReport {
    pub fn is_refined(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Refined { .. })
    }
}

/// Merged entries plus one report per batch, in batch order.
#[derive(Debug, Default)]
pub struct Refinement {
    pub entries: Vec<TkgEntry>,
    pub reports: Vec<BatchReport>,
    pub stats: PipelineStats,
}

impl Refinement {
    pub fn refined_batches(&self) -> usize {
        self.reports.iter().filter(|r| r.is_refined()).count()
    }

    pub fn fallback_batches(&self) -> usize {
        self.reports.len() - self.refined_batches()
    }
}

pub struct KnowledgeGraphRefiner<'a> {
    client: &'a dyn GenerationClient,
    limiter: &'a dyn RateLimiter,
    template: PromptTemplate,
    batch_size: usize,
    show_progress: bool,
}

impl<'a> KnowledgeGraphRefiner<'a> {
    pub fn new(
        client: &'a dyn GenerationClient,
        limiter: &'a dyn RateLimiter,
        batch_size: usize,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(PipelineError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            client,
            limiter,
            template: PromptTemplate::refine(),
            batch_size,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub async fn refine(&self, document_text: &str, entries: &[TkgEntry]) -> Refinement {
        let total_batches = entries.len().div_ceil(self.batch_size);
        info!(
            "Refining {} graph entries in {} batch(es) of up to {}",
            entries.len(),
            total_batches,
            self.batch_size
        );

        let tracker = if self.show_progress {
            ProgressTracker::new(total_batches)
        } else {
            ProgressTracker::hidden(total_batches)
        };

        let mut merged = Vec::with_capacity(entries.len());
        let mut reports = Vec::with_capacity(total_batches);

        for batch in batches(entries, self.batch_size) {
            let range = batch.range();
            tracker.set_message(format!("entries {}-{}", range.start, range.end));

            let outcome = match self.refine_batch(document_text, &batch).await {
                Ok(corrected) => {
                    debug!(
                        "Batch {}-{} refined into {} entries",
                        range.start,
                        range.end,
                        corrected.len()
                    );
                    let count = corrected.len();
                    merged.extend(corrected);
                    tracker.inc_processed();
                    BatchOutcome::Refined { corrected: count }
                }
                Err(e) => {
                    warn!(
                        "Refinement failed for batch {}-{}: {}; keeping original entries",
                        range.start, range.end, e
                    );
                    merged.extend_from_slice(batch.entries);
                    tracker.inc_failed();
                    BatchOutcome::Fallback {
                        reason: e.to_string(),
                    }
                }
            };

            reports.push(BatchReport { range, outcome });
        }

        tracker.add_records(merged.len());
        let stats = tracker.get_stats();
        tracker.finish();

        Refinement {
            entries: merged,
            reports,
            stats,
        }
    }

    async fn refine_batch(
        &self,
        document_text: &str,
        batch: &Batch<'_>,
    ) -> std::result::Result<Vec<TkgEntry>, BatchFailure> {
        let serialized = to_json_pretty(batch.entries)?;
        let prompt = self.template.render(&[
            ("article", document_text),
            ("entries", serialized.as_str()),
        ]);

        self.limiter.acquire().await;
        let response = self.client.generate(&prompt).await?;

        let values = extract_json_array(&response)?;
        Ok(values.into_iter().map(TkgEntry).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Unthrottled;
    use crate::generation::scripted::{Call, CallLog, RecordingLimiter, ScriptedClient, capture_logs};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entries(n: usize) -> Vec<TkgEntry> {
        (0..n)
            .map(|i| TkgEntry(json!({ "entity": format!("E{}", i), "timestamp": "unknown" })))
            .collect()
    }

    fn corrected(range: Range<usize>) -> String {
        let values: Vec<_> = range
            .map(|i| json!({ "entity": format!("E{}", i), "timestamp": "2023-01-01" }))
            .collect();
        format!("Corrected:\n```json\n{}\n```", serde_json::to_string(&values).unwrap())
    }

    #[tokio::test]
    async fn test_all_batches_refined_preserves_count_and_order() {
        let client = ScriptedClient::new([
            Some(corrected(0..5)),
            Some(corrected(5..10)),
            Some(corrected(10..12)),
        ]);
        let refiner = KnowledgeGraphRefiner::new(&client, &Unthrottled, 5).unwrap();

        let original = entries(12);
        let refinement = refiner.refine("Article text.", &original).await;

        assert_eq!(refinement.entries.len(), 12);
        for (i, entry) in refinement.entries.iter().enumerate() {
            assert_eq!(entry.0["entity"], format!("E{}", i));
            assert_eq!(entry.0["timestamp"], "2023-01-01");
        }
        assert_eq!(refinement.refined_batches(), 3);
        assert_eq!(client.prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_unparseable_batch_keeps_original_entries() {
        let client = ScriptedClient::new([
            Some(corrected(0..2)),
            Some("I could not produce JSON for this part.".to_string()),
            Some(corrected(4..6)),
        ]);
        let refiner = KnowledgeGraphRefiner::new(&client, &Unthrottled, 2).unwrap();

        let original = entries(6);
        let refinement = refiner.refine("Article text.", &original).await;

        assert_eq!(refinement.entries.len(), 6);
        assert_eq!(refinement.entries[0].0["timestamp"], "2023-01-01");
        assert_eq!(&refinement.entries[2..4], &original[2..4]);
        assert_eq!(refinement.entries[5].0["timestamp"], "2023-01-01");

        assert_eq!(refinement.reports[1].range, 2..4);
        assert!(matches!(
            refinement.reports[1].outcome,
            BatchOutcome::Fallback { .. }
        ));
        assert_eq!(refinement.refined_batches(), 2);
        assert_eq!(refinement.fallback_batches(), 1);
    }

    #[tokio::test]
    async fn test_all_batches_failing_returns_input() {
        let client = ScriptedClient::new([None, Some("[not json]".to_string()), Some(String::new())]);
        let refiner = KnowledgeGraphRefiner::new(&client, &Unthrottled, 3).unwrap();

        let original = entries(7);
        let refinement = refiner.refine("Article text.", &original).await;

        assert_eq!(refinement.entries, original);
        assert_eq!(refinement.fallback_batches(), 3);
        assert_eq!(refinement.stats.units_failed, 3);
    }

    #[tokio::test]
    async fn test_prompt_contains_article_and_batch() {
        let client = ScriptedClient::constant("[{\"entity\": \"E0\"}]");
        let refiner = KnowledgeGraphRefiner::new(&client, &Unthrottled, 5).unwrap();

        refiner.refine("The full article body.", &entries(1)).await;

        let prompts = client.prompts();
        assert!(prompts[0].contains("The full article body."));
        assert!(prompts[0].contains("        \"entity\": \"E0\""));
    }

    #[tokio::test]
    async fn test_corrections_may_change_batch_size() {
        let client = ScriptedClient::new([Some(corrected(0..3)), Some(corrected(3..4))]);
        let refiner = KnowledgeGraphRefiner::new(&client, &Unthrottled, 2).unwrap();

        let refinement = refiner.refine("Article.", &entries(4)).await;

        assert_eq!(refinement.entries.len(), 4);
        assert_eq!(
            refinement.reports[0].outcome,
            BatchOutcome::Refined { corrected: 3 }
        );
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_requests() {
        let client = ScriptedClient::constant("[]");
        let refiner = KnowledgeGraphRefiner::new(&client, &Unthrottled, 5).unwrap();

        let refinement = refiner.refine("Article.", &[]).await;

        assert!(refinement.entries.is_empty());
        assert!(refinement.reports.is_empty());
        assert!(client.prompts().is_empty());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let client = ScriptedClient::constant("[]");
        assert!(KnowledgeGraphRefiner::new(&client, &Unthrottled, 0).is_err());
    }

    #[tokio::test]
    async fn test_limiter_acquired_before_every_batch_request() {
        let log = CallLog::new();
        let client = ScriptedClient::new([Some(corrected(0..2)), None, Some(corrected(4..5))])
            .with_log(log.clone());
        let limiter = RecordingLimiter::new(log.clone());
        let refiner = KnowledgeGraphRefiner::new(&client, &limiter, 2).unwrap();

        refiner.refine("Article.", &entries(5)).await;

        assert_eq!(log.count(Call::Acquire), client.prompts().len());
        assert_eq!(log.count(Call::Generate), 3);
        assert!(log.acquire_precedes_each_generate());
    }

    #[tokio::test]
    async fn test_fallback_batch_logs_warning_with_range() {
        let (logs, _guard) = capture_logs();
        let client = ScriptedClient::new([
            Some(corrected(0..2)),
            Some("no json here".to_string()),
            Some(corrected(4..6)),
        ]);
        let refiner = KnowledgeGraphRefiner::new(&client, &Unthrottled, 2).unwrap();

        let refinement = refiner.refine("Article.", &entries(6)).await;

        let output = String::from_utf8(logs.lock().unwrap().clone()).unwrap();
        let warnings: Vec<_> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Refinement failed for batch 2-4"));
        assert!(warnings[0].contains("keeping original entries"));

        let BatchOutcome::Fallback { reason } = &refinement.reports[1].outcome else {
            panic!("batch 2-4 should have fallen back");
        };
        assert!(warnings[0].contains(reason.as_str()));
    }
}
