//! Query routing
//!
//! Classifies a free-text query as a weather question or a document question
//! with a single LLM call, then normalizes the textual answer. Ambiguous
//! output falls back to the document route.

use crate::error::Result;
use crate::llm::{ChatMessage, LlmClient};
use std::sync::Arc;

const ROUTER_INSTRUCTION: &str = "\
You are a routing assistant. Analyze the user's query and determine the appropriate route.

Rules:
- If the query asks about weather, temperature, climate, or mentions a city's weather conditions, respond with: weather
- If the query asks about document content, PDF information, or what's mentioned in a document, respond with: document
- Respond with ONLY one word: either 'weather' or 'document'

Examples:
- \"What's the weather in London?\" -> weather
- \"Tell me about the temperature in Paris\" -> weather
- \"What is mentioned in the document?\" -> document
- \"Summarize the PDF content\" -> document";

/// Context source selected for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Weather,
    Document,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Weather => "weather",
            Route::Document => "document",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LLM-backed query classifier
pub struct Router {
    client: Arc<dyn LlmClient>,
}

impl Router {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Classify a query into one of the two routes
    pub async fn classify(&self, query: &str) -> Result<Route> {
        let messages = vec![
            ChatMessage::system(ROUTER_INSTRUCTION),
            ChatMessage::user(query),
        ];

        let answer = self.client.chat_completion(messages, 0.0).await?;
        let route = resolve_route(&answer);

        tracing::debug!(query, raw = %answer.trim(), route = %route, "routed query");

        Ok(route)
    }
}

/// Normalize the model's textual answer to a route.
///
/// Matches the literal token "weather" or a "weather" substring first, then
/// "pdf"/"document" substrings. Anything else defaults to the document route.
pub fn resolve_route(answer: &str) -> Route {
    let normalized = answer.trim().to_lowercase();

    if normalized == "weather" || normalized.contains("weather") {
        Route::Weather
    } else if normalized.contains("pdf") || normalized.contains("document") {
        Route::Document
    } else {
        Route::Document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tokens() {
        assert_eq!(resolve_route("weather"), Route::Weather);
        assert_eq!(resolve_route("document"), Route::Document);
        assert_eq!(resolve_route("pdf"), Route::Document);
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(resolve_route("The route is: weather."), Route::Weather);
        assert_eq!(resolve_route("This looks like a PDF query"), Route::Document);
        assert_eq!(resolve_route("Document content question"), Route::Document);
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(resolve_route("  WEATHER\n"), Route::Weather);
        assert_eq!(resolve_route("Pdf"), Route::Document);
    }

    #[test]
    fn test_ambiguous_defaults_to_document() {
        assert_eq!(resolve_route(""), Route::Document);
        assert_eq!(resolve_route("I am not sure"), Route::Document);
        assert_eq!(resolve_route("42"), Route::Document);
    }
}
