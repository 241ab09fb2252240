use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub rag: RagConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible inference endpoint, e.g. a vLLM server.
    pub inference_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Context window reported through model metadata. Also the fixed value
    /// the retrieve-only interceptor reports.
    pub context_window: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    pub embedding_model: String,
    /// Dimensionality of the hashed embedding provider.
    pub embedding_dimensions: usize,
    /// Top-k used by retrieve when the request omits max_node_count.
    pub default_max_node_count: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()?,
            },
            llm: LlmConfig {
                inference_url: env::var("LLM_INFERENCE_URL")
                    .unwrap_or_else(|_| "http://localhost:8000/v1/chat/completions".to_string()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "default-model".to_string()),
                api_key: env::var("LLM_ACCESS_SECRET").ok(),
                context_window: env::var("LLM_CONTEXT_WINDOW")
                    .unwrap_or_else(|_| "4096".to_string())
                    .parse()?,
            },
            rag: RagConfig {
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "BAAI/bge-small-en-v1.5".to_string()),
                embedding_dimensions: env::var("EMBEDDING_DIMENSIONS")
                    .unwrap_or_else(|_| "384".to_string())
                    .parse()?,
                default_max_node_count: env::var("DEFAULT_MAX_NODE_COUNT")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
                chunk_size: env::var("CHUNK_SIZE")
                    .unwrap_or_else(|_| "200".to_string())
                    .parse()?,
                chunk_overlap: env::var("CHUNK_OVERLAP")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()?,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            llm: LlmConfig {
                inference_url: "http://localhost:8000/v1/chat/completions".to_string(),
                model: "default-model".to_string(),
                api_key: None,
                context_window: 4096,
            },
            rag: RagConfig {
                embedding_model: "BAAI/bge-small-en-v1.5".to_string(),
                embedding_dimensions: 384,
                default_max_node_count: 5,
                chunk_size: 200,
                chunk_overlap: 20,
            },
        }
    }
}
