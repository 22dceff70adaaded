//! Wayfinder Core Library
//!
//! Routes a natural-language question to the matching context provider and
//! composes a grounded answer.
//!
//! # Flow
//! - Router classifies the query as weather or document (LLM + fallback)
//! - Weather provider fetches a live lookup; document index answers a
//!   top-k similarity query over the ingested passages
//! - Response composer asks the LLM for the final answer from the context

pub mod compose;
pub mod config;
pub mod error;
pub mod index;
pub mod llm;
pub mod pipeline;
pub mod routing;
pub mod weather;

pub use compose::ResponseComposer;
pub use config::{Config, IndexConfig, LlmConfig, WeatherConfig};
pub use error::{Error, Result, WayfinderError};
pub use index::{
    DocumentIndex, HttpVectorStore, MemoryStore, PassagePoint, ScoredPassage, VectorStore,
    DEFAULT_TOP_K, NO_MATCH_PLACEHOLDER,
};
pub use llm::{ChatMessage, LlmClient, OpenAiClient};
pub use pipeline::{Exchange, Pipeline};
pub use routing::{resolve_route, Route, Router};
pub use weather::{extract_city, WeatherOutcome, WeatherProvider, WeatherReport};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "wayfinder";
