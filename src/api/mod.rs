//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Indexing
//! - `POST /index` - Chunk, embed, and store documents under a named index
//! - `GET /indexes` - List indexes
//! - `GET /indexes/{index_name}/documents` - List an index's stored chunks
//! - `DELETE /indexes/{index_name}` - Delete an index
//!
//! ## Querying
//! - `POST /query` - Retrieve context and generate an answer
//! - `POST /retrieve` - Run the query pipeline with generation suppressed;
//!   returns the assembled prompt and source nodes
//!
//! ## Health
//! - `GET /health` - Health check endpoint

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

pub use routes::create_router;
