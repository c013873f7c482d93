// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod formatter;
mod progress;
mod qa;
mod refiner;

pub use formatter::QaTimestampFormatter;
pub use progress::{PipelineStats, ProgressTracker};
pub use qa::{QaGenerator, QaRun};
pub use refiner::{BatchFailure, BatchOutcome, BatchReport, KnowledgeGraphRefiner, Refinement};
