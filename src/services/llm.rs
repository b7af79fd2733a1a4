//! Streaming chat client for the Ollama chat endpoint.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::models::{ChatMessage, Config};

/// Generates a grounded answer from an ordered message sequence. The sink
/// receives each token fragment in emission order before the full
/// concatenated response is returned.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        on_token: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String, ChatError>;
}

/// Request body for the /api/chat endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

/// One NDJSON line of the streamed chat response.
#[derive(Debug, Default, Deserialize)]
struct ChatChunk {
    #[serde(default)]
    message: ChunkMessage,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkMessage {
    #[serde(default)]
    content: String,
}

/// Client for the Ollama chat API.
#[derive(Debug, Clone)]
pub struct OllamaChat {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaChat {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.chat_model.clone(),
        }
    }
}

#[async_trait]
impl ChatModel for OllamaChat {
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        on_token: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String, ChatError> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest {
                model: &self.model,
                messages,
                stream: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let mut full = String::new();
        // Raw bytes are buffered and split on newlines; a network frame may
        // end mid-line or mid-UTF-8-sequence.
        let mut buf: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        let mut done = false;

        while let Some(frame) = stream.next().await {
            let frame = frame.map_err(|e| ChatError::StreamError(e.to_string()))?;
            buf.extend_from_slice(&frame);

            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                if consume_line(&line, &mut full, on_token) {
                    done = true;
                    break;
                }
            }
            if done {
                break;
            }
        }

        if !done && !buf.is_empty() {
            consume_line(&buf, &mut full, on_token);
        }

        Ok(full)
    }
}

/// Decode one NDJSON line, forward its content to the sink, and report
/// whether the stream signalled completion. Undecodable lines are skipped.
fn consume_line(line: &[u8], full: &mut String, on_token: &mut (dyn FnMut(&str) + Send)) -> bool {
    let Ok(chunk) = serde_json::from_slice::<ChatChunk>(line) else {
        return false;
    };
    if !chunk.message.content.is_empty() {
        full.push_str(&chunk.message.content);
        on_token(&chunk.message.content);
    }
    chunk.done
}
