use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Free-form metadata attached to documents and retrieval results.
pub type Metadata = HashMap<String, serde_json::Value>;

// ============= Chat Types =============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

// ============= Ingestion Types =============

/// A document submitted for indexing. Chunked into nodes before storage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Document {
    pub text: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

/// A stored chunk of a document, as held by the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique chunk identifier.
    pub id: String,
    /// Identifier of the source document this chunk belongs to.
    pub doc_id: String,
    pub content: String,
    pub metadata: Metadata,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub embedding: Option<Vec<f32>>,
}

/// A node matched by a similarity search, before API shaping.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub node: Node,
    pub score: f32,
}

// ============= Retrieval Types =============

/// One retrieval hit as returned to API clients.
///
/// All five fields are always present in the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NodeResult {
    pub doc_id: String,
    pub node_id: String,
    pub text: String,
    pub score: f32,
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RetrieveRequest {
    pub index_name: String,
    pub query: String,
    /// Maximum number of nodes to return. Defaults to the configured top-k.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_node_count: Option<usize>,
}

/// Result of a retrieve operation: `count == results.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RetrieveResponse {
    pub query: String,
    pub results: Vec<NodeResult>,
    pub count: usize,
}

/// A retrieve run through the full query pipeline with generation suppressed:
/// the prompt that would have been sent to the model, plus the source nodes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CapturedQuery {
    pub query: String,
    /// The exact chat messages the generation step would have received.
    pub messages: Vec<ChatMessage>,
    pub results: Vec<NodeResult>,
    pub count: usize,
}

// ============= Indexing API Types =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndexRequest {
    pub index_name: String,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndexResponse {
    pub index_name: String,
    /// Ids of the chunks created, in document order.
    pub document_ids: Vec<String>,
    pub count: usize,
}

/// Summary of one named index.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndexInfo {
    pub name: String,
    pub document_count: usize,
    pub dimensions: usize,
}

/// A stored chunk as listed by the document-listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndexedDocument {
    pub doc_id: String,
    pub node_id: String,
    pub text: String,
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteIndexResponse {
    pub success: bool,
    pub index_name: String,
    pub documents_deleted: usize,
}

// ============= Query API Types =============

/// Generation parameters forwarded to the inference backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    pub index_name: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_node_count: Option<usize>,
    #[serde(default)]
    pub options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub answer: String,
    pub source_nodes: Vec<NodeResult>,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Llm(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Embedding(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Configuration(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
