// file: src/generation/scripted.rs
// description: in-memory generation client and rate limiter recording calls for tests

use crate::error::{PipelineError, Result};
use crate::generation::{GenerationClient, RateLimiter};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Acquire,
    Generate,
}

/// Ordered record of limiter and client calls shared by the test doubles.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    /// True when every generate call directly follows exactly one acquire.
    pub fn acquire_precedes_each_generate(&self) -> bool {
        let calls = self.calls();
        calls.len() % 2 == 0
            && calls
                .chunks(2)
                .all(|pair| pair == [Call::Acquire, Call::Generate])
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }
}

/// Limiter that never waits and logs each acquire.
pub struct RecordingLimiter {
    log: CallLog,
}

impl RecordingLimiter {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl RateLimiter for RecordingLimiter {
    async fn acquire(&self) {
        self.log.push(Call::Acquire);
    }
}

/// Replays queued responses in order and records every prompt it receives.
/// `None` entries simulate a failed request. Once the queue is exhausted the
/// fallback response is returned.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Option<String>>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<String>>,
    log: Option<CallLog>,
}

impl ScriptedClient {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| r.map(Into::into)).collect()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
            log: None,
        }
    }

    /// Answers every prompt with the same text.
    pub fn constant(response: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Some(response.into()),
            prompts: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Some(log) = &self.log {
            log.push(Call::Generate);
        }
        self.prompts.lock().unwrap().push(prompt.to_string());

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        next.ok_or_else(|| PipelineError::Generation("scripted failure".to_string()))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Collects formatted log output written while the returned guard is alive.
pub fn capture_logs() -> (Arc<Mutex<Vec<u8>>>, tracing::subscriber::DefaultGuard) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || BufferWriter(Arc::clone(&sink)))
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    (buffer, tracing::subscriber::set_default(subscriber))
}

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
