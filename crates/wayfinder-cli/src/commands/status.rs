//! Status command

use crate::app::StatusArgs;
use anyhow::Result;
use std::sync::Arc;
use wayfinder_core::{
    Config, DocumentIndex, HttpVectorStore, LlmClient, MemoryStore, OpenAiClient, VectorStore,
};

pub async fn run(args: StatusArgs, config: &Config) -> Result<()> {
    let client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config.llm.clone())?);

    let store: Arc<dyn VectorStore> = match &config.index.vector_store_url {
        Some(url) => Arc::new(HttpVectorStore::new(
            url.clone(),
            config.index.collection.clone(),
        )?),
        None => Arc::new(MemoryStore::new()),
    };

    let index =
        DocumentIndex::build(&args.document, client, store, config.index.top_k).await?;

    println!("Document:        {}", args.document.display());
    println!("Passages:        {}", index.passage_count().await?);
    println!();
    println!("Embedding model: {}", config.llm.embedding_model);
    println!("Chat model:      {}", config.llm.chat_model);
    println!("Vector store:    {}", config.index.vector_store_url.as_deref().unwrap_or("in-memory"));
    println!("Collection:      {}", config.index.collection);
    println!("Top-k:           {}", config.index.top_k);

    Ok(())
}
