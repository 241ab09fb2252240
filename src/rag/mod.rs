//! Retrieval pipeline components.
//!
//! # Module Structure
//!
//! - [`embeddings`](crate::rag::embeddings) - Embedding providers (hashed default, fastembed)
//! - [`cache`](crate::rag::cache) - Embedding cache keyed by content hash
//! - [`chunker`](crate::rag::chunker) - Text chunking for document processing
//! - [`handler`](crate::rag::handler) - Named-index operations over embedder + store
//! - [`query`](crate::rag::query) - Prompt assembly, generation, and retrieve-only capture
//!
//! # Pipeline
//!
//! 1. **Ingestion** - Documents are chunked and embedded
//! 2. **Storage** - Embedded chunks stored in a named vector index
//! 3. **Retrieval** - Query embedded, similar chunks retrieved
//! 4. **Generation** - Answer generated with the retrieved context, or, on the
//!    retrieve-only path, the assembled prompt is captured and returned instead

pub mod cache;
pub mod chunker;
pub mod embeddings;
pub mod handler;
pub mod query;

pub use embeddings::{Embedder, EmbeddingProvider, HashEmbedder};
pub use handler::VectorStoreHandler;
pub use query::QueryEngine;
