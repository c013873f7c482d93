// file: src/exporter/mod.rs
// description: output writers for Q&A text and knowledge graph json
// reference: internal module structure

pub mod json;
pub mod qa_text;

pub use json::{GraphStore, to_json_pretty};
pub use qa_text::{QaTextWriter, read_qa_text, render_qa_records};
