//! Retrieval-grounded conversation session.

use crate::error::TurnError;
use crate::models::{ChatMessage, SearchResult};
use crate::services::{ChatModel, Embedder, VectorStore};

/// Exchanges (user/assistant pairs) retained in conversation history.
pub const MAX_HISTORY: usize = 5;

/// Grounding-only directive sent verbatim as the system message every turn.
pub const SYSTEM_PROMPT: &str = r#"
You are a CLI-based documentation assistant.

You answer questions strictly using ONLY the provided context.
The context comes from retrieved markdown files.

Rules:
1. Do NOT use prior knowledge.
2. Do NOT guess or infer beyond the provided context.
3. If the answer is not clearly present, say:
   "The provided context does not contain enough information to answer this."
4. Be concise but complete.
5. If possible, cite the relevant section or file name from the context.
6. If the question is ambiguous, ask for clarification.

Answer format:
- Direct answer first.
- Then optional short supporting explanation from context.
- Include citations if available.
"#;

/// One interactive session: retrieval plus bounded conversation history.
///
/// History is appended to only after a turn fully succeeds, so a failed
/// embed, search, or generation leaves it untouched.
pub struct ChatSession<'a> {
    embedder: &'a dyn Embedder,
    store: &'a dyn VectorStore,
    model: &'a dyn ChatModel,
    top_k: u64,
    history: Vec<ChatMessage>,
}

impl<'a> ChatSession<'a> {
    pub fn new(
        embedder: &'a dyn Embedder,
        store: &'a dyn VectorStore,
        model: &'a dyn ChatModel,
        top_k: u64,
    ) -> Self {
        Self {
            embedder,
            store,
            model,
            top_k,
            history: Vec::new(),
        }
    }

    /// Embed the question and retrieve the most relevant chunks. Zero hits
    /// is valid: the answer is then generated over an empty context.
    pub async fn ground(&self, question: &str) -> Result<Vec<SearchResult>, TurnError> {
        let query = self.embedder.embed_one(question).await?;
        let results = self.store.search(query, self.top_k).await?;
        Ok(results)
    }

    /// Generate a grounded answer, streaming tokens to the sink. On success
    /// the question and full response are committed to history as one
    /// user/assistant pair.
    pub async fn answer(
        &mut self,
        question: &str,
        results: &[SearchResult],
        on_token: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String, TurnError> {
        let context = build_context(results);

        // Retain only the most recent exchanges.
        if self.history.len() > MAX_HISTORY * 2 {
            let excess = self.history.len() - MAX_HISTORY * 2;
            self.history.drain(..excess);
        }

        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(self.history.iter().cloned());
        messages.push(ChatMessage::user(format!(
            "Context:\n{context}\n\nQuestion: {question}"
        )));

        let response = self.model.chat_stream(&messages, on_token).await?;

        self.history.push(ChatMessage::user(question));
        self.history.push(ChatMessage::assistant(response.clone()));

        Ok(response)
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

/// Concatenate hits in store order, each annotated with its 1-based rank,
/// source, and similarity score. Empty on zero hits.
pub fn build_context(results: &[SearchResult]) -> String {
    use std::fmt::Write;

    let mut block = String::new();
    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(
            block,
            "[{}] (source: {}, score: {:.4})\n{}\n",
            i + 1,
            result.source,
            result.score,
            result.content
        );
    }
    block
}
