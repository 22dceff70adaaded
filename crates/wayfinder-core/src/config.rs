//! Configuration management
//!
//! Every collaborator receives its configuration at construction; only
//! [`Config::load`] touches the environment or the config file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration (chat completions and embeddings)
    #[serde(default)]
    pub llm: LlmConfig,

    /// Weather data provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Document index configuration
    #[serde(default)]
    pub index: IndexConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible service
    #[serde(default = "default_llm_url")]
    pub base_url: String,

    /// Model name for chat completions (routing, city extraction, answers)
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather data provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the weather API
    #[serde(default = "default_weather_url")]
    pub base_url: String,

    /// API key for the weather provider
    #[serde(default)]
    pub api_key: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            api_key: String::new(),
        }
    }
}

/// Document index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Collection name in the vector store
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Number of passages returned per retrieval
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// URL of a remote vector store deployment.
    /// When absent, passages are held in an in-process store.
    #[serde(default)]
    pub vector_store_url: Option<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            top_k: default_top_k(),
            vector_store_url: None,
        }
    }
}

fn default_llm_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_embedding_dimensions() -> usize {
    1536
}

fn default_timeout() -> u64 {
    30
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org".to_string()
}

fn default_collection() -> String {
    "document_passages".to_string()
}

fn default_top_k() -> usize {
    crate::index::DEFAULT_TOP_K
}

impl Config {
    /// Load config from the default path, applying environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Apply `WAYFINDER_*` environment variable overrides
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("WAYFINDER_LLM_URL") {
            self.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("WAYFINDER_CHAT_MODEL") {
            self.llm.chat_model = model;
        }
        if let Ok(model) = std::env::var("WAYFINDER_EMBEDDING_MODEL") {
            self.llm.embedding_model = model;
        }
        if let Ok(dims) = std::env::var("WAYFINDER_EMBEDDING_DIMS") {
            if let Ok(dims) = dims.parse() {
                self.llm.embedding_dimensions = dims;
            }
        }
        if let Ok(key) = std::env::var("WAYFINDER_LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("WAYFINDER_WEATHER_API_KEY") {
            self.weather.api_key = key;
        }
        if let Ok(url) = std::env::var("WAYFINDER_WEATHER_URL") {
            self.weather.base_url = url;
        }
        if let Ok(url) = std::env::var("WAYFINDER_VECTOR_STORE_URL") {
            self.index.vector_store_url = Some(url);
        }
    }
}
