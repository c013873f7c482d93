// file: src/generation/mod.rs
// description: text generation service client and request throttling
// reference: internal module structure

pub mod client;
#[cfg(test)]
pub(crate) mod scripted;
pub mod throttle;

pub use client::{ChatCompletionClient, GenerationClient};
pub use throttle::{FixedDelay, RateLimiter, Unthrottled};
