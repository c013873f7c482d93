// file: src/input/mod.rs
// description: input loading module exports
// reference: internal module structure

pub mod articles;

pub use articles::ArticleReader;
