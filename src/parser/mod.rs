// file: src/parser/mod.rs
// description: document chunking and response parsing module exports
// reference: internal module structure

pub mod chunker;
pub mod json_array;
pub mod response;

pub use chunker::{TextChunker, split_sentences, word_count};
pub use json_array::{ParseFailure, extract_json_array, find_array_span};
pub use response::clean_qa_response;
