//! Vector store backends
//!
//! The index talks to a cosine-similarity collection through [`VectorStore`].
//! [`MemoryStore`] keeps points in-process (the default deployment);
//! [`HttpVectorStore`] targets a Qdrant-style REST deployment.

use crate::error::{Result, WayfinderError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

/// One stored passage: identifier, embedding vector, and payload text
#[derive(Debug, Clone, Serialize)]
pub struct PassagePoint {
    pub id: Uuid,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A search hit with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredPassage {
    pub id: Uuid,
    pub text: String,
    pub score: f32,
}

/// Cosine-similarity collection of passage embeddings
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Drop the collection if it exists and create it fresh for the
    /// given vector dimensions
    async fn recreate(&self, dimensions: usize) -> Result<()>;

    /// Bulk-insert points as a single batch
    async fn upsert(&self, points: Vec<PassagePoint>) -> Result<()>;

    /// Top-k nearest neighbors by decreasing cosine similarity
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredPassage>>;

    /// Number of stored points
    async fn count(&self) -> Result<usize>;
}

/// Cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// In-process store. Read-only after construction from the query path's
/// perspective, so concurrent searches are safe.
#[derive(Default)]
pub struct MemoryStore {
    points: RwLock<Vec<PassagePoint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn recreate(&self, _dimensions: usize) -> Result<()> {
        self.points
            .write()
            .map_err(|_| WayfinderError::VectorStore("Store lock poisoned".to_string()))?
            .clear();
        Ok(())
    }

    async fn upsert(&self, mut points: Vec<PassagePoint>) -> Result<()> {
        self.points
            .write()
            .map_err(|_| WayfinderError::VectorStore("Store lock poisoned".to_string()))?
            .append(&mut points);
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredPassage>> {
        let points = self
            .points
            .read()
            .map_err(|_| WayfinderError::VectorStore("Store lock poisoned".to_string()))?;

        let mut scored: Vec<ScoredPassage> = points
            .iter()
            .map(|p| ScoredPassage {
                id: p.id,
                text: p.text.clone(),
                score: cosine_similarity(vector, &p.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        Ok(scored)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self
            .points
            .read()
            .map_err(|_| WayfinderError::VectorStore("Store lock poisoned".to_string()))?
            .len())
    }
}

/// Remote Qdrant-style deployment reached over REST
pub struct HttpVectorStore {
    http_client: reqwest::Client,
    base_url: String,
    collection: String,
}

impl HttpVectorStore {
    pub fn new(base_url: String, collection: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(WayfinderError::Http)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    async fn check(&self, response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WayfinderError::VectorStore(format!(
                "{} failed (HTTP {}): {}",
                action, status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl VectorStore for HttpVectorStore {
    async fn recreate(&self, dimensions: usize) -> Result<()> {
        // Drop any previous collection; a miss is fine
        let _ = self
            .http_client
            .delete(self.collection_url())
            .send()
            .await
            .map_err(WayfinderError::Http)?;

        let body = serde_json::json!({
            "vectors": { "size": dimensions, "distance": "Cosine" }
        });

        let response = self
            .http_client
            .put(self.collection_url())
            .json(&body)
            .send()
            .await
            .map_err(WayfinderError::Http)?;

        self.check(response, "Collection create").await?;
        Ok(())
    }

    async fn upsert(&self, points: Vec<PassagePoint>) -> Result<()> {
        #[derive(Serialize)]
        struct Point<'a> {
            id: Uuid,
            vector: &'a [f32],
            payload: Payload<'a>,
        }

        #[derive(Serialize)]
        struct Payload<'a> {
            text: &'a str,
        }

        let body = serde_json::json!({
            "points": points
                .iter()
                .map(|p| Point {
                    id: p.id,
                    vector: &p.embedding,
                    payload: Payload { text: &p.text },
                })
                .collect::<Vec<_>>()
        });

        let response = self
            .http_client
            .put(format!("{}/points", self.collection_url()))
            .json(&body)
            .send()
            .await
            .map_err(WayfinderError::Http)?;

        self.check(response, "Point upsert").await?;
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredPassage>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            result: Vec<Hit>,
        }

        #[derive(Deserialize)]
        struct Hit {
            id: Uuid,
            score: f32,
            payload: HitPayload,
        }

        #[derive(Deserialize)]
        struct HitPayload {
            text: String,
        }

        let body = serde_json::json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true
        });

        let response = self
            .http_client
            .post(format!("{}/points/search", self.collection_url()))
            .json(&body)
            .send()
            .await
            .map_err(WayfinderError::Http)?;

        let response = self.check(response, "Search").await?;
        let parsed: SearchResponse = response.json().await.map_err(WayfinderError::Http)?;

        Ok(parsed
            .result
            .into_iter()
            .map(|hit| ScoredPassage {
                id: hit.id,
                text: hit.payload.text,
                score: hit.score,
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        #[derive(Deserialize)]
        struct InfoResponse {
            result: Info,
        }

        #[derive(Deserialize)]
        struct Info {
            points_count: usize,
        }

        let response = self
            .http_client
            .get(self.collection_url())
            .send()
            .await
            .map_err(WayfinderError::Http)?;

        let response = self.check(response, "Collection info").await?;
        let parsed: InfoResponse = response.json().await.map_err(WayfinderError::Http)?;

        Ok(parsed.result.points_count)
    }
}
