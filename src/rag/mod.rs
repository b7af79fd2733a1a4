//! Retrieval-augmented pipeline: ingestion and conversation.

mod chat;
mod ingest;

pub use chat::{ChatSession, MAX_HISTORY, SYSTEM_PROMPT, build_context};
pub use ingest::{BATCH_SIZE, ingest};
