//! Ingestion pipeline: walk, chunk, embed, insert.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::error::IngestError;
use crate::models::Chunk;
use crate::services::{Embedder, VectorStore, chunk_markdown};

/// Chunks embedded and inserted per round trip.
pub const BATCH_SIZE: usize = 32;

/// Ingest every `.md` file under `dir` into the vector store.
///
/// Documents are walked in sorted order, chunked, and written in batches of
/// [`BATCH_SIZE`]: one embedding call and one insert call per batch. Any
/// read, embed, or insert failure aborts the run; batches inserted before
/// the failure stay committed. Returns the number of chunks written.
pub async fn ingest(
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
    dir: &Path,
    chunk_size: usize,
    overlap: usize,
) -> Result<usize, IngestError> {
    store.ensure_collection().await?;

    let chunks = collect_chunks(dir, chunk_size, overlap)?;
    if chunks.is_empty() {
        println!("No markdown files found.");
        return Ok(0);
    }

    println!("\nTotal chunks: {}", chunks.len());

    let batches = chunks.len().div_ceil(BATCH_SIZE);
    let pb = ProgressBar::new(batches as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches")
            .unwrap()
            .progress_chars("#>-"),
    );

    for (batch_no, batch) in chunks.chunks(BATCH_SIZE).enumerate() {
        let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
        let sources: Vec<String> = batch.iter().map(|c| c.source.clone()).collect();
        let indices: Vec<i64> = batch.iter().map(|c| c.chunk_index).collect();

        let embeddings = embedder.embed(&texts).await.map_err(|e| {
            IngestError::EmbedBatch {
                batch: batch_no,
                source: e,
            }
        })?;

        store
            .insert(texts, sources, indices, embeddings)
            .await
            .map_err(|e| IngestError::InsertBatch {
                batch: batch_no,
                source: e,
            })?;

        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(chunks.len())
}

/// Walk `dir` for `.md` files in sorted order and chunk each one. A read
/// failure on any document aborts the whole collection pass.
fn collect_chunks(dir: &Path, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>, IngestError> {
    let mut chunks = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| IngestError::WalkError(e.to_string()))?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|e| IngestError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let source = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let document_chunks = chunk_markdown(&content, &source, chunk_size, overlap);
        println!("  {}: {} chunks", source, document_chunks.len());
        chunks.extend(document_chunks);
    }

    Ok(chunks)
}
