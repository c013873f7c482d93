// file: src/parser/chunker.rs
// description: sentence-based document chunking with sentence overlap
// reference: word count approximates the request token budget

use crate::models::Chunk;
use std::ops::Range;

const SENTENCE_BOUNDARY: &str = ". ";

/// Split text into trimmed sentences, each keeping its terminating period.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(SENTENCE_BOUNDARY)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_words: usize,
    overlap: usize,
}

impl TextChunker {
    pub fn new(max_words: usize, overlap: usize) -> Self {
        Self { max_words, overlap }
    }

    pub fn chunk(&self, document_id: &str, text: &str) -> Vec<Chunk> {
        let sentences = split_sentences(text);
        let mut chunks = Vec::new();

        let mut start = 0;
        let mut carried = 0;
        let mut words = 0;

        for (i, sentence) in sentences.iter().enumerate() {
            let sentence_words = word_count(sentence);
            let has_new_content = i - start > carried;

            if has_new_content && words + sentence_words > self.max_words {
                chunks.push(build_chunk(
                    document_id,
                    chunks.len(),
                    &sentences,
                    start..i,
                    carried,
                ));

                // Seed with up to `overlap` sentences before the boundary; sentence `i`
                // is always added below, so the next chunk holds new content.
                let seed_start = i.saturating_sub(self.overlap);
                carried = i - seed_start;
                start = seed_start;
                words = sentences[seed_start..i].iter().map(|s| word_count(s)).sum();
            }

            words += sentence_words;
        }

        if sentences.len() > start + carried {
            chunks.push(build_chunk(
                document_id,
                chunks.len(),
                &sentences,
                start..sentences.len(),
                carried,
            ));
        }

        chunks
    }
}

fn build_chunk(
    document_id: &str,
    sequence_index: usize,
    sentences: &[&str],
    span: Range<usize>,
    overlap: usize,
) -> Chunk {
    Chunk {
        text: sentences[span.clone()].join(" "),
        sequence_index,
        document_id: document_id.to_string(),
        sentences: span,
        overlap,
    }
}
