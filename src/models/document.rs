// file: src/models/document.rs
// description: article document model with content fingerprint
// reference: internal data structures

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const ID_LEN: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub published_at: Option<NaiveDateTime>,
    pub body: String,
}

impl Document {
    pub fn new(title: String, published_at: Option<NaiveDateTime>, body: String) -> Self {
        let id = Self::compute_id(&title, &body);

        Self {
            id,
            title,
            published_at,
            body,
        }
    }

    /// Publication date, or the current local time for undated articles.
    pub fn default_timestamp(&self) -> NaiveDateTime {
        self.published_at
            .unwrap_or_else(|| Local::now().naive_local())
    }

    fn compute_id(title: &str, body: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(title.as_bytes());
        hasher.update([0u8]);
        hasher.update(body.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..ID_LEN].to_string()
    }
}
