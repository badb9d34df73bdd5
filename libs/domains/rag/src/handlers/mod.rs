mod rest;

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CollectionStats, Document, DocumentList, IndexRequest, IndexResponse, QueryRequest,
    QueryResponse, RelevantDocument,
};
use crate::service::RagService;

/// OpenAPI documentation for the RAG API
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::ready,
        rest::stats,
        rest::collection,
        rest::index_documents,
        rest::index_sample,
        rest::query,
        rest::query_get,
        rest::list_documents,
        rest::documents_by_source,
        rest::delete_document,
    ),
    components(
        schemas(
            Document, RelevantDocument,
            QueryRequest, QueryResponse,
            IndexRequest, IndexResponse,
            CollectionStats, DocumentList
        )
    ),
    tags(
        (name = "rag", description = "Retrieval-augmented question answering"),
        (name = "documents", description = "Indexed document management")
    )
)]
pub struct RagApiDoc;

/// Create the RAG router. Paths are relative to the `/api/v1` prefix.
pub fn rag_router(service: Arc<RagService>) -> Router {
    Router::new()
        .route("/ready", get(rest::ready))
        .route("/stats", get(rest::stats))
        .route("/collection", get(rest::collection))
        .route("/index", post(rest::index_documents))
        .route("/index/sample", post(rest::index_sample))
        .route("/query", post(rest::query).get(rest::query_get))
        .route("/documents", get(rest::list_documents))
        .route("/documents/source/{source}", get(rest::documents_by_source))
        .route("/documents/{id}", delete(rest::delete_document))
        .with_state(service)
}
