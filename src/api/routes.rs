use crate::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

async fn health() -> &'static str {
    "OK"
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/index", post(crate::api::handlers::rag::index_documents))
        .route("/indexes", get(crate::api::handlers::rag::list_indexes))
        .route(
            "/indexes/{index_name}/documents",
            get(crate::api::handlers::rag::list_documents),
        )
        .route(
            "/indexes/{index_name}",
            delete(crate::api::handlers::rag::delete_index),
        )
        .route("/query", post(crate::api::handlers::query::query))
        .route("/retrieve", post(crate::api::handlers::query::retrieve))
}
