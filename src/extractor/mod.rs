// file: src/extractor/mod.rs
// description: temporal extraction module exports
// reference: internal module structure

pub mod patterns;
pub mod timestamp;

pub use timestamp::{
    DateParseError, TIMESTAMP_FORMAT, TimestampCandidate, TimestampOrigin, TimestampResolver,
    format_timestamp,
};
