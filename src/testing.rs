//! In-memory collaborator doubles shared by pipeline tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ChatError, EmbeddingError, VectorStoreError};
use crate::models::{ChatMessage, SearchResult};
use crate::services::{ChatModel, Embedder, VectorStore};

/// Embedder returning fixed-dimension zero vectors and recording each call.
pub struct MockEmbedder {
    dim: usize,
    batch_sizes: Mutex<Vec<usize>>,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            batch_sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.batch_sizes.lock().unwrap().len()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.batch_sizes.lock().unwrap().push(texts.len());
        Ok(vec![vec![0.0; self.dim]; texts.len()])
    }
}

/// Embedder that succeeds until a given call number, then fails.
pub struct FailingEmbedder {
    fail_from: usize,
    calls: Mutex<usize>,
}

impl FailingEmbedder {
    pub fn fail_from_call(fail_from: usize) -> Self {
        Self {
            fail_from,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut calls = self.calls.lock().unwrap();
        let call = *calls;
        *calls += 1;
        if call >= self.fail_from {
            return Err(EmbeddingError::ConnectionError("mock failure".to_string()));
        }
        Ok(vec![vec![0.0; 4]; texts.len()])
    }
}

/// One inserted row, columns re-zipped.
#[derive(Debug, Clone)]
pub struct Row {
    pub content: String,
    pub source: String,
    pub chunk_index: i64,
    pub embedding: Vec<f32>,
}

/// In-memory vector store recording inserts and serving canned hits.
pub struct MemoryStore {
    rows: Mutex<Vec<Row>>,
    ensured: Mutex<bool>,
    hits: Mutex<Vec<SearchResult>>,
    fail_search: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            ensured: Mutex::new(false),
            hits: Mutex::new(Vec::new()),
            fail_search: false,
        }
    }

    pub fn with_hits(hits: Vec<SearchResult>) -> Self {
        let store = Self::new();
        *store.hits.lock().unwrap() = hits;
        store
    }

    pub fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Self::new()
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        self.rows.lock().unwrap().clone()
    }

    pub fn ensured(&self) -> bool {
        *self.ensured.lock().unwrap()
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn ensure_collection(&self) -> Result<(), VectorStoreError> {
        *self.ensured.lock().unwrap() = true;
        Ok(())
    }

    async fn insert(
        &self,
        contents: Vec<String>,
        sources: Vec<String>,
        chunk_indices: Vec<i64>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), VectorStoreError> {
        let mut rows = self.rows.lock().unwrap();
        for (((content, source), chunk_index), embedding) in contents
            .into_iter()
            .zip(sources)
            .zip(chunk_indices)
            .zip(embeddings)
        {
            rows.push(Row {
                content,
                source,
                chunk_index,
                embedding,
            });
        }
        Ok(())
    }

    async fn search(
        &self,
        _query: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        if self.fail_search {
            return Err(VectorStoreError::SearchError("mock failure".to_string()));
        }
        let hits = self.hits.lock().unwrap();
        Ok(hits.iter().take(top_k as usize).cloned().collect())
    }
}

/// Chat model replaying a scripted response as single-character tokens.
pub struct ScriptedChat {
    response: String,
    fail: bool,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl ScriptedChat {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: false,
            last_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            last_messages: Mutex::new(Vec::new()),
        }
    }

    /// Messages received by the most recent call.
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        on_token: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String, ChatError> {
        *self.last_messages.lock().unwrap() = messages.to_vec();
        if self.fail {
            return Err(ChatError::ConnectionError("mock failure".to_string()));
        }
        for token in self.response.chars() {
            on_token(&token.to_string());
        }
        Ok(self.response.clone())
    }
}
