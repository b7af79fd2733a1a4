//! Service layer: chunking plus the external collaborators.

mod chunker;
mod embedding;
mod llm;
mod vector_store;

pub use chunker::chunk_markdown;
pub use embedding::{Embedder, OllamaEmbedder};
pub use llm::{ChatModel, OllamaChat};
pub use vector_store::{QdrantBackend, VectorStore};
