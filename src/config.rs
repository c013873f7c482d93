// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fallback environment variable for the generation API key.
pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub generation: GenerationConfig,
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub qa: QaConfig,
    pub refine: RefineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Delay applied before every request, in milliseconds.
    pub throttle_ms: u64,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    pub max_words: usize,
    pub overlap_sentences: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QaConfig {
    /// Tag each record with the earliest date found in its chunk instead of
    /// the document date.
    #[serde(default)]
    pub infer_chunk_timestamps: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefineConfig {
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub qa_path: PathBuf,
    pub formatted_qa_path: PathBuf,
    pub graph_path: PathBuf,
}

impl GenerationConfig {
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Configured key, or the provider's conventional environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("TEMPORAL_KG")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            generation: GenerationConfig {
                base_url: "https://api.mistral.ai/v1".to_string(),
                model: "mistral-large-latest".to_string(),
                api_key: None,
                throttle_ms: 1500,
                timeout_secs: Some(120),
            },
            chunking: ChunkingConfig {
                max_words: 8000,
                overlap_sentences: 100,
            },
            qa: QaConfig::default(),
            refine: RefineConfig { batch_size: 5 },
            output: OutputConfig {
                qa_path: PathBuf::from("data/questions_answers.txt"),
                formatted_qa_path: PathBuf::from("data/formatted_questions_answers.txt"),
                graph_path: PathBuf::from("data/updated_temporal_knowledge_graph.json"),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_words == 0 {
            return Err(PipelineError::Config(
                "max_words must be greater than 0".to_string(),
            ));
        }

        if self.refine.batch_size == 0 {
            return Err(PipelineError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        Validator::validate_url(self.generation.base_url.trim())
            .map_err(|e| PipelineError::Config(format!("generation.base_url: {}", e)))?;

        Ok(())
    }
}
