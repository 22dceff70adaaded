//! LLM integration
//!
//! Provides the client trait and HTTP implementation for:
//! - Chat completions (routing, city extraction, answer composition)
//! - Embedding generation via external services (OpenAI, vLLM, etc.)

mod client;

pub use client::{ChatMessage, LlmClient, OpenAiClient};
