//! Ingest command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Config;
use crate::rag;
use crate::services::{OllamaEmbedder, QdrantBackend};

pub async fn handle_ingest(dir: &Path, config: &Config) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let embedder = OllamaEmbedder::new(config);
    let store = QdrantBackend::new(config).context("failed to connect to vector store")?;

    let written = rag::ingest(&embedder, &store, dir, config.chunk_size, config.overlap)
        .await
        .context("ingestion failed")?;

    if written > 0 {
        println!("Ingestion complete: {written} chunks written.");
    }
    Ok(())
}
