// file: src/models/tkg.rs
// description: opaque temporal knowledge graph entries and refinement batches
// reference: https://docs.rs/serde_json

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Range;

/// One knowledge graph record. Its fields are never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TkgEntry(pub Value);

/// Contiguous slice of the entry sequence submitted together for correction.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    pub start: usize,
    pub entries: &'a [TkgEntry],
}

impl Batch<'_> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.entries.len()
    }
}

/// Partition `entries` into batches of at most `batch_size`, in order.
pub fn batches(entries: &[TkgEntry], batch_size: usize) -> impl Iterator<Item = Batch<'_>> {
    let size = batch_size.max(1);
    entries
        .chunks(size)
        .enumerate()
        .map(move |(i, slice)| Batch {
            start: i * size,
            entries: slice,
        })
}
