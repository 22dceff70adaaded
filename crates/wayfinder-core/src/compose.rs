//! Response composition
//!
//! Final LLM call: answer the query using the gathered context. The model's
//! output is returned as-is.

use crate::error::Result;
use crate::llm::{ChatMessage, LlmClient};
use std::sync::Arc;

pub struct ResponseComposer {
    client: Arc<dyn LlmClient>,
}

impl ResponseComposer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn compose(&self, query: &str, context: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(
                "Answer the user's query based on the provided context. Be concise and helpful.",
            ),
            ChatMessage::user(format!("Query: {}\n\nContext: {}", query, context)),
        ];

        self.client.chat_completion(messages, 0.7).await
    }
}
