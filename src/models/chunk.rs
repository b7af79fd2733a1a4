//! Chunk and search result models.

use serde::{Deserialize, Serialize};

/// A bounded span of document text prepared for embedding and retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text, non-empty after trimming.
    pub content: String,

    /// Identifier of the originating document (path relative to the ingest root).
    pub source: String,

    /// Zero-based sequence number, unique per source, assigned in emission order.
    pub chunk_index: i64,
}

/// A single retrieval hit from the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub source: String,

    /// Cosine similarity; higher is more relevant.
    pub score: f32,
}
