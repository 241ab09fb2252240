//! Query and retrieve-only handlers.

use crate::types::{AppError, CapturedQuery, QueryRequest, QueryResponse, Result, RetrieveRequest};
use crate::AppState;
use axum::{extract::State, Json};

/// Answer a query with retrieved context.
#[utoipa::path(
    post,
    path = "/query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Query answered", body = QueryResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Index not found"),
        (status = 502, description = "Inference backend error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "query"
)]
pub async fn query(
    State(state): State<AppState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    if payload.query.is_empty() {
        return Err(AppError::InvalidInput("Query required".into()));
    }

    let response = state.engine.query(&payload).await?;
    Ok(Json(response))
}

/// Run the query pipeline with generation suppressed.
///
/// Returns the chat messages the generation step would have received, plus
/// the retrieved source nodes.
#[utoipa::path(
    post,
    path = "/retrieve",
    request_body = RetrieveRequest,
    responses(
        (status = 200, description = "Prompt captured", body = CapturedQuery),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Index not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "query"
)]
pub async fn retrieve(
    State(state): State<AppState>,
    Json(payload): Json<RetrieveRequest>,
) -> Result<Json<CapturedQuery>> {
    if payload.query.is_empty() {
        return Err(AppError::InvalidInput("Query required".into()));
    }

    let captured = state.engine.retrieve(&payload).await?;
    Ok(Json(captured))
}
