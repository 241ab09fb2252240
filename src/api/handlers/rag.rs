//! Index management handlers.
//!
//! Provides endpoints for:
//! - Document ingestion with chunking
//! - Index listing, inspection, and deletion

use crate::types::{
    AppError, DeleteIndexResponse, IndexInfo, IndexRequest, IndexResponse, IndexedDocument, Result,
};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

// ============================================================================
// Index Endpoint
// ============================================================================

/// Index documents under a named index.
///
/// Chunks each document and stores embeddings for later retrieval. The index
/// is created on first use; indexing an empty document list creates an empty
/// index.
#[utoipa::path(
    post,
    path = "/index",
    request_body = IndexRequest,
    responses(
        (status = 200, description = "Documents indexed", body = IndexResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "index"
)]
pub async fn index_documents(
    State(state): State<AppState>,
    Json(payload): Json<IndexRequest>,
) -> Result<Json<IndexResponse>> {
    if payload.index_name.is_empty() {
        return Err(AppError::InvalidInput("Index name required".into()));
    }

    let document_ids = state
        .handler
        .index_documents(&payload.index_name, &payload.documents)
        .await?;

    let count = document_ids.len();
    Ok(Json(IndexResponse {
        index_name: payload.index_name,
        document_ids,
        count,
    }))
}

// ============================================================================
// Index Listing Endpoints
// ============================================================================

/// List all indexes.
#[utoipa::path(
    get,
    path = "/indexes",
    responses(
        (status = 200, description = "Indexes listed", body = Vec<IndexInfo>),
        (status = 500, description = "Internal server error")
    ),
    tag = "index"
)]
pub async fn list_indexes(State(state): State<AppState>) -> Result<Json<Vec<IndexInfo>>> {
    let indexes = state.handler.list_indexes().await?;
    Ok(Json(indexes))
}

/// List the stored chunks of an index.
#[utoipa::path(
    get,
    path = "/indexes/{index_name}/documents",
    params(("index_name" = String, Path, description = "Index to inspect")),
    responses(
        (status = 200, description = "Documents listed", body = Vec<IndexedDocument>),
        (status = 404, description = "Index not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "index"
)]
pub async fn list_documents(
    State(state): State<AppState>,
    Path(index_name): Path<String>,
) -> Result<Json<Vec<IndexedDocument>>> {
    let documents = state.handler.list_documents(&index_name).await?;
    Ok(Json(documents))
}

// ============================================================================
// Delete Index Endpoint
// ============================================================================

/// Delete an index and all its stored chunks.
#[utoipa::path(
    delete,
    path = "/indexes/{index_name}",
    params(("index_name" = String, Path, description = "Index to delete")),
    responses(
        (status = 200, description = "Index deleted", body = DeleteIndexResponse),
        (status = 404, description = "Index not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "index"
)]
pub async fn delete_index(
    State(state): State<AppState>,
    Path(index_name): Path<String>,
) -> Result<Json<DeleteIndexResponse>> {
    let documents_deleted = state.handler.delete_index(&index_name).await?;

    Ok(Json(DeleteIndexResponse {
        success: true,
        index_name,
        documents_deleted,
    }))
}
