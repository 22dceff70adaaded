//! End-to-end pipeline tests with a scripted LLM, an in-process vector
//! store, and a canned weather responder.

use async_trait::async_trait;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use wayfinder_core::{
    ChatMessage, DocumentIndex, LlmClient, MemoryStore, Pipeline, Result, Route, VectorStore,
    WeatherConfig, WeatherOutcome, WeatherProvider, NO_MATCH_PLACEHOLDER,
};

const DIMENSIONS: usize = 32;

/// Deterministic pseudo-embedding: byte histogram folded into a fixed
/// number of dimensions. Identical text always maps to the same vector.
fn fake_embedding(text: &str) -> Vec<f32> {
    let mut v = vec![0.0f32; DIMENSIONS];
    for byte in text.bytes() {
        v[byte as usize % DIMENSIONS] += 1.0;
    }
    v
}

/// LLM stub that answers each call site from a script
struct ScriptedLlm {
    route_reply: String,
    city_reply: String,
}

impl ScriptedLlm {
    fn new(route_reply: &str, city_reply: &str) -> Arc<Self> {
        Arc::new(Self {
            route_reply: route_reply.to_string(),
            city_reply: city_reply.to_string(),
        })
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        _temperature: f32,
    ) -> Result<String> {
        let system = &messages[0].content;
        if system.contains("routing assistant") {
            Ok(self.route_reply.clone())
        } else if system.contains("city name") {
            Ok(self.city_reply.clone())
        } else {
            // Composition: echo something grounded in the provided context
            Ok(format!("Composed answer. {}", messages[1].content))
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(fake_embedding(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| fake_embedding(t)).collect())
    }

    fn embedding_dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// One-shot HTTP responder for the weather endpoint
fn spawn_weather_stub(status_line: &'static str, body: &'static str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}", addr)
}

fn write_document(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

async fn build_index(client: Arc<ScriptedLlm>, path: &PathBuf) -> DocumentIndex {
    let store: Arc<dyn VectorStore> = Arc::new(MemoryStore::new());
    DocumentIndex::build(path, client, store, 3).await.unwrap()
}

fn weather_provider(base_url: String) -> WeatherProvider {
    WeatherProvider::new(WeatherConfig {
        base_url,
        api_key: "test-key".to_string(),
    })
    .unwrap()
}

const DOCUMENT: &str = "The northern expedition departed in spring.\n\n\
    Supplies were carried by mule over the mountain pass.\n\n\
    The expedition returned after four months with detailed maps.";

const WEATHER_BODY: &str = r#"{"main":{"temp":21.5,"humidity":60},"weather":[{"description":"clear sky"}]}"#;

#[tokio::test]
async fn weather_query_routes_to_weather_context() {
    let client = ScriptedLlm::new("weather", "Paris");
    let (_dir, path) = write_document(DOCUMENT);
    let index = build_index(client.clone(), &path).await;
    let weather = weather_provider(spawn_weather_stub("200 OK", WEATHER_BODY));

    let pipeline = Pipeline::new(client, weather, index);
    let exchange = pipeline.answer("What's the weather in Paris?").await.unwrap();

    assert_eq!(exchange.route, Route::Weather);
    assert!(exchange.context.contains("Paris"));
    assert!(exchange.context.contains("21.5"));
    assert!(!exchange.response.is_empty());
}

#[tokio::test]
async fn document_query_routes_to_retrieval_context() {
    let client = ScriptedLlm::new("document", "unused");
    let (_dir, path) = write_document(DOCUMENT);
    let index = build_index(client.clone(), &path).await;
    let weather = weather_provider("http://127.0.0.1:9".to_string());

    let pipeline = Pipeline::new(client, weather, index);
    let exchange = pipeline
        .answer("What is mentioned in the document?")
        .await
        .unwrap();

    assert_eq!(exchange.route, Route::Document);
    // Context is built only from ingested passage text
    for passage in exchange.context.split("\n\n") {
        assert!(
            DOCUMENT.contains(passage),
            "passage not drawn from the document: {:?}",
            passage
        );
    }
    assert!(!exchange.response.is_empty());
}

#[tokio::test]
async fn empty_corpus_still_produces_a_response() {
    let client = ScriptedLlm::new("document", "unused");
    let (_dir, path) = write_document("");
    let index = build_index(client.clone(), &path).await;
    let weather = weather_provider("http://127.0.0.1:9".to_string());

    let pipeline = Pipeline::new(client, weather, index);
    let exchange = pipeline.answer("What does the document say?").await.unwrap();

    assert_eq!(exchange.route, Route::Document);
    assert_eq!(exchange.context, NO_MATCH_PLACEHOLDER);
    assert!(!exchange.response.is_empty());
}

#[tokio::test]
async fn failed_weather_lookup_becomes_error_record() {
    let client = ScriptedLlm::new("weather", "Atlantis");
    let (_dir, path) = write_document(DOCUMENT);
    let index = build_index(client.clone(), &path).await;
    let weather = weather_provider(spawn_weather_stub("404 Not Found", "{}"));

    let pipeline = Pipeline::new(client, weather, index);
    let exchange = pipeline.answer("weather in Atlantis?").await.unwrap();

    assert_eq!(exchange.route, Route::Weather);
    assert!(exchange.context.contains("Failed to fetch weather for Atlantis"));
    assert!(!exchange.response.is_empty());
}

#[tokio::test]
async fn weather_provider_parses_the_four_fields() {
    let weather = weather_provider(spawn_weather_stub("200 OK", WEATHER_BODY));
    let outcome = weather.fetch("Paris").await.unwrap();

    match outcome {
        WeatherOutcome::Report(report) => {
            assert_eq!(report.city, "Paris");
            assert_eq!(report.temperature, 21.5);
            assert_eq!(report.description, "clear sky");
            assert_eq!(report.humidity, 60);
        }
        WeatherOutcome::Failed { error } => panic!("unexpected failure: {}", error),
    }
}

#[tokio::test]
async fn retrieval_respects_top_k_bounds() {
    let client = ScriptedLlm::new("document", "unused");
    let (_dir, path) = write_document(DOCUMENT);
    let index = build_index(client.clone(), &path).await;

    let results = index.retrieve_top("expedition", 2).await.unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= 2);

    let results = index.retrieve_top("expedition", 50).await.unwrap();
    let stored = index.passage_count().await.unwrap();
    assert_eq!(results.len(), stored.min(50));
}

#[tokio::test]
async fn empty_index_retrieval_returns_placeholder() {
    let client = ScriptedLlm::new("document", "unused");
    let (_dir, path) = write_document("");
    let index = build_index(client.clone(), &path).await;

    assert_eq!(index.passage_count().await.unwrap(), 0);
    let results = index.retrieve("anything").await.unwrap();
    assert_eq!(results, vec![NO_MATCH_PLACEHOLDER.to_string()]);
}

#[tokio::test]
async fn passage_count_matches_ingested_passages() {
    let client = ScriptedLlm::new("document", "unused");
    let (_dir, path) = write_document(DOCUMENT);
    let index = build_index(client.clone(), &path).await;

    let expected = wayfinder_core::index::split_passages(DOCUMENT).len();
    assert_eq!(index.passage_count().await.unwrap(), expected);
}

#[tokio::test]
async fn missing_document_blocks_construction() {
    let client = ScriptedLlm::new("document", "unused");
    let store: Arc<dyn VectorStore> = Arc::new(MemoryStore::new());
    let result = DocumentIndex::build(
        std::path::Path::new("/nonexistent/notes.txt"),
        client,
        store,
        3,
    )
    .await;

    assert!(result.is_err());
}
