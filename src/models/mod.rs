//! Data models shared across the pipeline.

mod chunk;
mod config;
mod message;

pub use chunk::{Chunk, SearchResult};
pub use config::Config;
pub use message::{ChatMessage, Role};
