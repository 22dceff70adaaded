//! Pipeline orchestration
//!
//! One request runs strictly linearly: classify the query, fetch context
//! from exactly one of the two providers, compose the answer. No stage
//! branches back, retries, or times out on its own.

use crate::compose::ResponseComposer;
use crate::config::Config;
use crate::error::Result;
use crate::index::{DocumentIndex, HttpVectorStore, MemoryStore, VectorStore};
use crate::llm::{LlmClient, OpenAiClient};
use crate::routing::{Route, Router};
use crate::weather::{self, WeatherProvider};
use std::path::Path;
use std::sync::Arc;

/// Final value of one pipeline run
#[derive(Debug, Clone)]
pub struct Exchange {
    pub query: String,
    pub route: Route,
    pub context: String,
    pub response: String,
}

/// Sequences router, context providers, and composer
pub struct Pipeline {
    client: Arc<dyn LlmClient>,
    router: Router,
    weather: WeatherProvider,
    index: DocumentIndex,
    composer: ResponseComposer,
}

impl Pipeline {
    pub fn new(
        client: Arc<dyn LlmClient>,
        weather: WeatherProvider,
        index: DocumentIndex,
    ) -> Self {
        Self {
            router: Router::new(client.clone()),
            composer: ResponseComposer::new(client.clone()),
            client,
            weather,
            index,
        }
    }

    /// Assemble a pipeline from configuration and a document path.
    /// Fails fast when the document cannot be ingested.
    pub async fn from_config(config: &Config, document: &Path) -> Result<Self> {
        let client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config.llm.clone())?);

        let store: Arc<dyn VectorStore> = match &config.index.vector_store_url {
            Some(url) => Arc::new(HttpVectorStore::new(
                url.clone(),
                config.index.collection.clone(),
            )?),
            None => Arc::new(MemoryStore::new()),
        };

        let index =
            DocumentIndex::build(document, client.clone(), store, config.index.top_k).await?;
        let weather = WeatherProvider::new(config.weather.clone())?;

        Ok(Self::new(client, weather, index))
    }

    /// Answer one query: route, gather context, compose
    pub async fn answer(&self, query: &str) -> Result<Exchange> {
        let route = self.router.classify(query).await?;

        let context = match route {
            Route::Weather => {
                let city = weather::extract_city(self.client.as_ref(), query).await?;
                tracing::debug!(city = %city, "extracted city");
                self.weather.fetch(&city).await?.to_string()
            }
            Route::Document => {
                let passages = self.index.retrieve(query).await?;
                tracing::debug!(count = passages.len(), "retrieved passages");
                passages.join("\n\n")
            }
        };

        let response = self.composer.compose(query, &context).await?;

        Ok(Exchange {
            query: query.to_string(),
            route,
            context,
            response,
        })
    }

    /// Diagnostic accessor for the underlying index
    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }
}
