//! Command handlers wiring configuration, clients, and the pipeline.

mod chat;
mod ingest;

pub use chat::handle_chat;
pub use ingest::handle_ingest;
