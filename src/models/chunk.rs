// file: src/models/chunk.rs
// description: bounded span of a document prepared for one generation request

use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub sequence_index: usize,
    pub document_id: String,
    /// Sentence indices covered by this chunk, carried sentences included.
    pub sentences: Range<usize>,
    /// Leading sentences repeated from the previous chunk.
    pub overlap: usize,
}

impl Chunk {
    /// Sentences that first appear in this chunk.
    pub fn new_sentences(&self) -> Range<usize> {
        (self.sentences.start + self.overlap)..self.sentences.end
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
