//! Embedding client for the Ollama embeddings endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;
use crate::models::Config;

/// Turns texts into fixed-dimension vectors. Output length and order match
/// the input; failure of any one text fails the whole call.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per text, order-preserving.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed a single text.
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let texts = [text.to_string()];
        let embeddings = self.embed(&texts).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("empty embedding response".to_string()))
    }
}

/// Request body for the /api/embeddings endpoint.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response from the /api/embeddings endpoint.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Client for the Ollama embeddings API.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.embed_model.clone(),
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    /// The endpoint processes one text at a time, so the batch is looped
    /// through sequentially.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let url = format!("{}/api/embeddings", self.base_url);
        let mut embeddings = Vec::with_capacity(texts.len());

        for text in texts {
            let response = self
                .client
                .post(&url)
                .json(&EmbedRequest {
                    model: &self.model,
                    prompt: text,
                })
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(EmbeddingError::ServerError(status.as_u16()));
            }

            let body: EmbedResponse = response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
            embeddings.push(body.embedding);
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_request_wire_format() {
        let request = EmbedRequest {
            model: "nomic-embed-text",
            prompt: "hello",
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"model":"nomic-embed-text","prompt":"hello"}"#);
    }

    #[test]
    fn test_embed_response_decodes() {
        let body: EmbedResponse =
            serde_json::from_str(r#"{"embedding":[0.1,0.2,0.3]}"#).unwrap();
        assert_eq!(body.embedding, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config {
            ollama_url: "http://localhost:11434/".to_string(),
            ..Config::default()
        };
        let embedder = OllamaEmbedder::new(&config);
        assert_eq!(embedder.base_url, "http://localhost:11434");
    }
}
