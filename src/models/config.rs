//! Environment-driven configuration with fixed fallback defaults.

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
pub const DEFAULT_COLLECTION: &str = "documents";

/// Runtime configuration, built once at startup and passed into each
/// component. Malformed numeric values keep the default rather than
/// failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Ollama endpoint (embeddings + chat).
    pub ollama_url: String,

    /// Qdrant endpoint URL.
    pub qdrant_url: String,

    /// Embedding model identifier.
    pub embed_model: String,

    /// Chat model identifier.
    pub chat_model: String,

    /// Maximum chunk size in characters.
    pub chunk_size: usize,

    /// Overlap carried from one chunk into the next, in characters.
    pub overlap: usize,

    /// Number of search hits used to ground an answer.
    pub top_k: u64,

    /// Vector store collection name.
    pub collection: String,

    /// Embedding vector dimension.
    pub embed_dim: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            embed_model: "nomic-embed-text".to_string(),
            chat_model: "llama3.2".to_string(),
            chunk_size: 512,
            overlap: 64,
            top_k: 5,
            collection: DEFAULT_COLLECTION.to_string(),
            embed_dim: 768,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for unset or unparseable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_string("OLLAMA_URL") {
            config.ollama_url = v;
        }
        if let Some(v) = env_string("QDRANT_URL") {
            config.qdrant_url = v;
        }
        if let Some(v) = env_string("EMBED_MODEL") {
            config.embed_model = v;
        }
        if let Some(v) = env_string("CHAT_MODEL") {
            config.chat_model = v;
        }
        if let Some(v) = env_string("COLLECTION") {
            config.collection = v;
        }
        if let Some(n) = env_parsed("CHUNK_SIZE") {
            config.chunk_size = n;
        }
        if let Some(n) = env_parsed("CHUNK_OVERLAP") {
            config.overlap = n;
        }
        if let Some(n) = env_parsed("TOP_K") {
            config.top_k = n;
        }
        if let Some(n) = env_parsed("EMBED_DIM") {
            config.embed_dim = n;
        }

        config
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.ollama_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.qdrant_url, DEFAULT_QDRANT_URL);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.overlap, 64);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.embed_dim, 768);
    }

    #[test]
    fn test_env_overrides_applied() {
        // SAFETY: test-local env mutation; no other thread in this test
        // binary reads these keys concurrently.
        unsafe {
            std::env::set_var("DOCCHAT_TEST_CHUNK_SIZE", "1024");
        }
        let parsed: Option<usize> = env_parsed("DOCCHAT_TEST_CHUNK_SIZE");
        assert_eq!(parsed, Some(1024));
        unsafe {
            std::env::remove_var("DOCCHAT_TEST_CHUNK_SIZE");
        }
    }

    // The real config keys are process-global, so every phase that touches
    // them lives in this one test.
    #[test]
    fn test_from_env_maps_each_key_to_its_field() {
        let keys: &[(&str, &str)] = &[
            ("OLLAMA_URL", "http://ollama.test:1234"),
            ("QDRANT_URL", "http://qdrant.test:5678"),
            ("EMBED_MODEL", "test-embed"),
            ("CHAT_MODEL", "test-chat"),
            ("COLLECTION", "test_docs"),
            ("CHUNK_SIZE", "1000"),
            ("CHUNK_OVERLAP", "100"),
            ("TOP_K", "7"),
            ("EMBED_DIM", "384"),
        ];

        // SAFETY: only this test mutates these keys.
        unsafe {
            for (key, value) in keys {
                std::env::set_var(key, value);
            }
        }

        let config = Config::from_env();
        assert_eq!(config.ollama_url, "http://ollama.test:1234");
        assert_eq!(config.qdrant_url, "http://qdrant.test:5678");
        assert_eq!(config.embed_model, "test-embed");
        assert_eq!(config.chat_model, "test-chat");
        assert_eq!(config.collection, "test_docs");
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.overlap, 100);
        assert_eq!(config.top_k, 7);
        assert_eq!(config.embed_dim, 384);

        // Malformed numerics keep the default while string overrides stand.
        unsafe {
            std::env::set_var("CHUNK_SIZE", "not-a-number");
            std::env::set_var("TOP_K", "-3");
        }
        let config = Config::from_env();
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.overlap, 100);
        assert_eq!(config.embed_model, "test-embed");

        unsafe {
            for (key, _) in keys {
                std::env::remove_var(key);
            }
        }

        let config = Config::from_env();
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.ollama_url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn test_malformed_numeric_falls_back() {
        unsafe {
            std::env::set_var("DOCCHAT_TEST_TOP_K", "not-a-number");
        }
        let parsed: Option<u64> = env_parsed("DOCCHAT_TEST_TOP_K");
        assert_eq!(parsed, None);
        unsafe {
            std::env::remove_var("DOCCHAT_TEST_TOP_K");
        }
    }

    #[test]
    fn test_empty_env_value_ignored() {
        unsafe {
            std::env::set_var("DOCCHAT_TEST_EMPTY", "");
        }
        assert_eq!(env_string("DOCCHAT_TEST_EMPTY"), None);
        unsafe {
            std::env::remove_var("DOCCHAT_TEST_EMPTY");
        }
    }
}
