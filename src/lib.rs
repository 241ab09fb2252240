//! # Retrieva - Retrieval-Augmented Generation Engine
//!
//! A retrieval engine service built in Rust: named vector indexes over
//! embedded document chunks, a query pipeline that grounds generation in
//! retrieved context, and a retrieve-only path that captures the assembled
//! prompt instead of generating an answer.
//!
//! ## Overview
//!
//! Retrieva can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `retrieva-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use retrieva::rag::VectorStoreHandler;
//! use retrieva::types::Document;
//!
//! let ids = handler.index_documents("docs", &[Document {
//!     text: "Rust is a systems language".into(),
//!     metadata: Default::default(),
//! }]).await?;
//!
//! let result = handler.retrieve("docs", "what is rust?", Some(3)).await?;
//! assert!(result.count <= 3);
//! ```
//!
//! ## Retrieve-only interception
//!
//! The `/retrieve` path runs the full query pipeline against a
//! [`llm::RetrieveOnlyLlm`], a model stand-in that suppresses generation and
//! returns the assembled prompt as a per-call capture. Callers inspect the
//! prompt and source nodes instead of a generated answer.
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`db`] - Vector store abstraction and in-memory backend
//! - [`llm`] - Language model clients and the retrieve-only interceptor
//! - [`rag`] - Embeddings, chunking, index handler, query engine
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Vector store backends.
pub mod db;
/// Language model clients and abstractions.
pub mod llm;
/// Retrieval pipeline components.
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use db::{InMemoryVectorStore, VectorStore};
pub use llm::{InferenceClient, LanguageModel, RetrieveOnlyLlm};
pub use rag::{Embedder, EmbeddingProvider, QueryEngine, VectorStoreHandler};
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
    /// Named-index operations (chunk, embed, store, retrieve)
    pub handler: Arc<VectorStoreHandler>,
    /// Query pipeline (generation and retrieve-only capture)
    pub engine: Arc<QueryEngine>,
}

impl AppState {
    /// Build the full application state from configuration, using the
    /// configured embedding provider and the real inference client.
    pub fn from_config(config: Config) -> Result<Self> {
        let model: Arc<dyn LanguageModel> = Arc::new(InferenceClient::new(&config.llm));
        Self::with_model(config, model)
    }

    /// Build application state around a specific model implementation.
    pub fn with_model(config: Config, model: Arc<dyn LanguageModel>) -> Result<Self> {
        let embedder = EmbeddingProvider::from_env(&config.rag).create_embedder()?;
        let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new());
        let handler = Arc::new(VectorStoreHandler::new(store, embedder, &config.rag));
        let engine = Arc::new(QueryEngine::new(
            Arc::clone(&handler),
            model,
            config.llm.context_window,
        ));

        Ok(Self {
            config: Arc::new(config),
            handler,
            engine,
        })
    }
}
