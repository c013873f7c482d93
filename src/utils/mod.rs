// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;
pub mod template;
pub mod validation;

pub use template::PromptTemplate;
pub use validation::Validator;
