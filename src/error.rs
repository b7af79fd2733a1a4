//! Error types for the RAG chat CLI.

use thiserror::Error;

/// Errors related to embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to connect to embedding endpoint: {0}")]
    ConnectionError(String),

    #[error("embedding endpoint returned status {0}")]
    ServerError(u16),

    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

/// Errors related to chat generation.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to connect to chat endpoint: {0}")]
    ConnectionError(String),

    #[error("chat endpoint returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("chat request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("failed to read chat stream: {0}")]
    StreamError(String),
}

/// Errors related to vector store operations.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("failed to connect to Qdrant: {0}")]
    ConnectionError(String),

    #[error("collection error: {0}")]
    CollectionError(String),

    #[error("insert error: {0}")]
    InsertError(String),

    #[error("search error: {0}")]
    SearchError(String),
}

/// Errors related to the ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    FileReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("directory walk error: {0}")]
    WalkError(String),

    #[error("vector store error: {0}")]
    VectorStoreError(#[from] VectorStoreError),

    #[error("embed batch {batch}: {source}")]
    EmbedBatch {
        batch: usize,
        source: EmbeddingError,
    },

    #[error("insert batch {batch}: {source}")]
    InsertBatch {
        batch: usize,
        source: VectorStoreError,
    },
}

/// Recoverable errors within a single chat turn. The session reports these
/// and returns to the prompt; conversation history is left untouched.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("embedding question: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("searching knowledge base: {0}")]
    Search(#[from] VectorStoreError),

    #[error("generating response: {0}")]
    Generation(#[from] ChatError),
}
