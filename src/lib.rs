// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod generation;
pub mod input;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use config::{
    ChunkingConfig, Config, GenerationConfig, OutputConfig, QaConfig, RefineConfig,
};
pub use error::{PipelineError, Result};
pub use exporter::{GraphStore, QaTextWriter, read_qa_text};
pub use extractor::{TimestampResolver, format_timestamp};
pub use generation::{ChatCompletionClient, FixedDelay, GenerationClient, RateLimiter, Unthrottled};
pub use input::ArticleReader;
pub use models::{Chunk, Document, QaRecord, TkgEntry};
pub use parser::{TextChunker, extract_json_array};
pub use pipeline::{
    KnowledgeGraphRefiner, PipelineStats, ProgressTracker, QaGenerator, QaTimestampFormatter,
};
pub use utils::{PromptTemplate, Validator};
