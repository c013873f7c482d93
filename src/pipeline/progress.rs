// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for chunk and batch processing
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Counters for one run over chunks or batches.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub units_total: usize,
    pub units_processed: usize,
    pub units_failed: usize,
    pub units_empty: usize,
    pub records_emitted: usize,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.units_attempted() as f64 / self.duration_secs as f64
    }

    pub fn units_attempted(&self) -> usize {
        self.units_processed + self.units_failed + self.units_empty
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.units_attempted();
        if total == 0 {
            return 0.0;
        }
        (self.units_processed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    total: usize,
    processed: AtomicUsize,
    failed: AtomicUsize,
    empty: AtomicUsize,
    records: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_units: usize) -> Self {
        Self::with_color(total_units, true)
    }

    pub fn with_color(total_units: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_units as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(total_units, main_bar, detail_bar)
    }

    /// Tracker that counts without drawing anything.
    pub fn hidden(total_units: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let main_bar = multi_progress.add(ProgressBar::new(total_units as u64));
        let detail_bar = multi_progress.add(ProgressBar::new(0));
        Self::from_bars(total_units, main_bar, detail_bar)
    }

    fn from_bars(total: usize, main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            total,
            processed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            empty: AtomicUsize::new(0),
            records: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_processed(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_empty(&self) {
        self.empty.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_records(&self, count: usize) {
        self.records.fetch_add(count, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Processing complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            units_total: self.total,
            units_processed: self.processed.load(Ordering::SeqCst),
            units_failed: self.failed.load(Ordering::SeqCst),
            units_empty: self.empty.load(Ordering::SeqCst),
            records_emitted: self.records.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let records = self.records.load(Ordering::SeqCst);
        let failed = self.failed.load(Ordering::SeqCst);
        let empty = self.empty.load(Ordering::SeqCst);

        let message = format!("Records: {} | Empty: {} | Failed: {}", records, empty, failed);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stats_calculations() {
        let mut stats = PipelineStats::new();
        stats.units_processed = 80;
        stats.units_empty = 10;
        stats.units_failed = 10;
        stats.duration_secs = 10;

        assert_eq!(stats.units_attempted(), 100);
        assert_eq!(stats.units_per_second(), 10.0);
        assert!((stats.success_rate() - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_pipeline_stats_zero_duration() {
        let stats = PipelineStats::new();
        assert_eq!(stats.units_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counts() {
        let tracker = ProgressTracker::hidden(5);

        tracker.inc_processed();
        tracker.add_records(1);
        tracker.inc_empty();
        tracker.inc_failed();
        tracker.inc_failed();

        let stats = tracker.get_stats();
        assert_eq!(stats.units_total, 5);
        assert_eq!(stats.units_processed, 1);
        assert_eq!(stats.units_empty, 1);
        assert_eq!(stats.units_failed, 2);
        assert_eq!(stats.records_emitted, 1);
    }
}
