// file: src/pipeline/formatter.rs
// description: single-pass timestamp insertion for an existing Q&A text

use crate::generation::{GenerationClient, RateLimiter};
use crate::utils::PromptTemplate;
use tracing::{info, warn};

pub struct QaTimestampFormatter<'a> {
    client: &'a dyn GenerationClient,
    limiter: &'a dyn RateLimiter,
    template: PromptTemplate,
}

impl<'a> QaTimestampFormatter<'a> {
    pub fn new(client: &'a dyn GenerationClient, limiter: &'a dyn RateLimiter) -> Self {
        Self {
            client,
            limiter,
            template: PromptTemplate::timestamp_format(),
        }
    }

    /// Ask the service to put a `Timestamp:` line before each question.
    /// Falls back to `existing_qa` unchanged when the request fails or
    /// returns nothing.
    pub async fn format(&self, article_text: &str, article_date: &str, existing_qa: &str) -> String {
        if existing_qa.trim().is_empty() {
            warn!("No existing Q&A to format");
            return existing_qa.to_string();
        }

        let prompt = self.template.render(&[
            ("article", article_text),
            ("qa", existing_qa),
            ("timestamp", article_date),
        ]);

        self.limiter.acquire().await;
        match self.client.generate(&prompt).await {
            Ok(response) if !response.trim().is_empty() => {
                info!("Received formatted Q&A ({} chars)", response.trim().len());
                response.trim().to_string()
            }
            Ok(_) => {
                warn!("Formatting returned an empty response; keeping existing Q&A");
                existing_qa.to_string()
            }
            Err(e) => {
                warn!("Formatting request failed: {}; keeping existing Q&A", e);
                existing_qa.to_string()
            }
        }
    }
}
