// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod chunk;
pub mod document;
pub mod qa_record;
pub mod tkg;

pub use chunk::Chunk;
pub use document::Document;
pub use qa_record::QaRecord;
pub use tkg::{Batch, TkgEntry, batches};
