//! Vector store abstraction and Qdrant backend.

use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder, value::Kind,
};
use uuid::Uuid;

use crate::error::VectorStoreError;
use crate::models::{Config, SearchResult};

/// Similarity index over embedded chunks. Any conforming implementation is
/// substitutable without changing the ingestion or retrieval code.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection with a cosine index if it does not exist and
    /// make it query-ready. Idempotent.
    async fn ensure_collection(&self) -> Result<(), VectorStoreError>;

    /// Write one row per position of four equal-length parallel sequences.
    async fn insert(
        &self,
        contents: Vec<String>,
        sources: Vec<String>,
        chunk_indices: Vec<i64>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), VectorStoreError>;

    /// Return up to `top_k` hits ordered by similarity; fewer is valid.
    async fn search(
        &self,
        query: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;
}

/// Qdrant vector store backend.
pub struct QdrantBackend {
    client: Qdrant,
    collection: String,
    embedding_dim: u64,
}

impl QdrantBackend {
    pub fn new(config: &Config) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(&config.qdrant_url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            collection: config.collection.clone(),
            embedding_dim: config.embed_dim,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantBackend {
    async fn ensure_collection(&self) -> Result<(), VectorStoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VectorStoreError::CollectionError(e.to_string()))?;
        if exists {
            return Ok(());
        }

        let create = CreateCollectionBuilder::new(&self.collection)
            .vectors_config(VectorParamsBuilder::new(self.embedding_dim, Distance::Cosine));

        self.client
            .create_collection(create)
            .await
            .map_err(|e| VectorStoreError::CollectionError(e.to_string()))?;

        Ok(())
    }

    async fn insert(
        &self,
        contents: Vec<String>,
        sources: Vec<String>,
        chunk_indices: Vec<i64>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), VectorStoreError> {
        if contents.len() != sources.len()
            || contents.len() != chunk_indices.len()
            || contents.len() != embeddings.len()
        {
            return Err(VectorStoreError::InsertError(format!(
                "mismatched column lengths: {} contents, {} sources, {} indices, {} embeddings",
                contents.len(),
                sources.len(),
                chunk_indices.len(),
                embeddings.len()
            )));
        }
        if contents.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = contents
            .into_iter()
            .zip(sources)
            .zip(chunk_indices)
            .zip(embeddings)
            .map(|(((content, source), chunk_index), embedding)| {
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("content".to_string(), content.into());
                payload.insert("source".to_string(), source.into());
                payload.insert("chunk_index".to_string(), chunk_index.into());

                PointStruct::new(Uuid::new_v4().to_string(), embedding, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .map_err(|e| VectorStoreError::InsertError(e.to_string()))?;

        Ok(())
    }

    async fn search(
        &self,
        query: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let search =
            SearchPointsBuilder::new(&self.collection, query, top_k).with_payload(true);

        let results = self
            .client
            .search_points(search)
            .await
            .map_err(|e| VectorStoreError::SearchError(e.to_string()))?;

        let hits = results
            .result
            .into_iter()
            .map(|point| SearchResult {
                content: payload_str(&point.payload, "content"),
                source: payload_str(&point.payload, "source"),
                score: point.score,
            })
            .collect();

        Ok(hits)
    }
}

fn payload_str(payload: &HashMap<String, qdrant_client::qdrant::Value>, key: &str) -> String {
    payload
        .get(key)
        .and_then(|v| match &v.kind {
            Some(Kind::StringValue(s)) => Some(s.as_str()),
            _ => None,
        })
        .unwrap_or("")
        .to_string()
}
