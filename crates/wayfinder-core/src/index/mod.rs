//! Document index
//!
//! Ingests one document at construction time (load, split into passages,
//! embed each passage, store in a vector collection) and answers similarity
//! queries with the top-k nearest passages' text.

pub mod loader;
pub mod splitter;
pub mod store;

pub use loader::load_document;
pub use splitter::{split_passages, PASSAGE_OVERLAP_CHARS, PASSAGE_SIZE_CHARS};
pub use store::{
    cosine_similarity, HttpVectorStore, MemoryStore, PassagePoint, ScoredPassage, VectorStore,
};

use crate::error::Result;
use crate::llm::LlmClient;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Returned in place of an empty retrieval result
pub const NO_MATCH_PLACEHOLDER: &str = "No matching text found in the document.";

/// Default number of passages returned per retrieval
pub const DEFAULT_TOP_K: usize = 3;

/// Similarity index over one document's passages
pub struct DocumentIndex {
    client: Arc<dyn LlmClient>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl DocumentIndex {
    /// Ingest a document: load, split, embed every passage as one batch,
    /// recreate the collection, and store all points. Blocks until every
    /// embedding is computed and stored; any failure is fatal.
    pub async fn build(
        path: &Path,
        client: Arc<dyn LlmClient>,
        store: Arc<dyn VectorStore>,
        top_k: usize,
    ) -> Result<Self> {
        let text = loader::load_document(path)?;
        let passages = splitter::split_passages(&text);
        let passage_count = passages.len();

        store.recreate(client.embedding_dimensions()).await?;

        if !passages.is_empty() {
            let embeddings = client.embed_batch(&passages).await?;
            let points = passages
                .into_iter()
                .zip(embeddings)
                .map(|(text, embedding)| PassagePoint {
                    id: Uuid::new_v4(),
                    text,
                    embedding,
                })
                .collect();
            store.upsert(points).await?;
        }

        tracing::info!(document = %path.display(), passages = passage_count, "document ingested");

        Ok(Self {
            client,
            store,
            top_k,
        })
    }

    /// Retrieve the configured number of most similar passages
    pub async fn retrieve(&self, query: &str) -> Result<Vec<String>> {
        self.retrieve_top(query, self.top_k).await
    }

    /// Retrieve up to `top_k` passage texts in decreasing-similarity order.
    /// An empty result set yields the single placeholder string.
    pub async fn retrieve_top(&self, query: &str, top_k: usize) -> Result<Vec<String>> {
        let vector = self.client.embed(query).await?;
        let hits = self.store.search(&vector, top_k).await?;

        if hits.is_empty() {
            return Ok(vec![NO_MATCH_PLACEHOLDER.to_string()]);
        }

        Ok(hits.into_iter().map(|hit| hit.text).collect())
    }

    /// Total stored passage count
    pub async fn passage_count(&self) -> Result<usize> {
        self.store.count().await
    }
}
