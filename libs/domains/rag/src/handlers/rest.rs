//! REST handlers for indexing and querying

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{ErrorResponse, HealthCheckFuture, ValidatedJson, run_health_checks};
use std::sync::Arc;

use crate::error::{RagError, RagResult};
use crate::models::{
    CollectionStats, DocumentList, IndexRequest, IndexResponse, ListParams, QueryParams,
    QueryRequest, QueryResponse,
};
use crate::service::RagService;

/// Readiness probe: the vector store must answer
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "rag",
    responses(
        (status = 200, description = "Vector store reachable"),
        (status = 503, description = "Vector store unreachable")
    )
)]
pub async fn ready(State(service): State<Arc<RagService>>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "qdrant",
        Box::pin(async move { service.stats().await.map(|_| ()).map_err(|e| e.to_string()) }),
    )];

    match run_health_checks(checks).await {
        Ok(ok) => ok.into_response(),
        Err(unavailable) => unavailable.into_response(),
    }
}

/// Collection statistics
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "rag",
    responses(
        (status = 200, description = "Collection statistics", body = CollectionStats),
        (status = 500, description = "Vector store error", body = ErrorResponse)
    )
)]
pub async fn stats(State(service): State<Arc<RagService>>) -> RagResult<Json<CollectionStats>> {
    Ok(Json(service.stats().await?))
}

/// Collection details (same payload as `/stats`)
#[utoipa::path(
    get,
    path = "/api/v1/collection",
    tag = "rag",
    responses(
        (status = 200, description = "Collection details", body = CollectionStats),
        (status = 500, description = "Vector store error", body = ErrorResponse)
    )
)]
pub async fn collection(
    State(service): State<Arc<RagService>>,
) -> RagResult<Json<CollectionStats>> {
    Ok(Json(service.stats().await?))
}

/// Embed and store documents
///
/// Partial failures are reported in `failed_docs` with a 200 status.
#[utoipa::path(
    post,
    path = "/api/v1/index",
    tag = "rag",
    request_body = IndexRequest,
    responses(
        (status = 200, description = "Indexing finished", body = IndexResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    )
)]
pub async fn index_documents(
    State(service): State<Arc<RagService>>,
    ValidatedJson(request): ValidatedJson<IndexRequest>,
) -> Json<IndexResponse> {
    Json(service.index_documents(request.documents).await)
}

/// Index the `.txt` files of the configured sample folder, or the built-in samples
#[utoipa::path(
    post,
    path = "/api/v1/index/sample",
    tag = "rag",
    responses(
        (status = 200, description = "Indexing finished", body = IndexResponse),
        (status = 500, description = "Folder could not be read", body = ErrorResponse)
    )
)]
pub async fn index_sample(State(service): State<Arc<RagService>>) -> RagResult<Json<IndexResponse>> {
    Ok(Json(service.index_sample_dir().await?))
}

/// Answer a question from the indexed documents
#[utoipa::path(
    post,
    path = "/api/v1/query",
    tag = "rag",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Answer with supporting documents", body = QueryResponse),
        (status = 400, description = "Empty or malformed query", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn query(
    State(service): State<Arc<RagService>>,
    ValidatedJson(request): ValidatedJson<QueryRequest>,
) -> RagResult<Json<QueryResponse>> {
    Ok(Json(service.query(request).await?))
}

/// Query-string variant of `POST /query`
#[utoipa::path(
    get,
    path = "/api/v1/query",
    tag = "rag",
    params(QueryParams),
    responses(
        (status = 200, description = "Answer with supporting documents", body = QueryResponse),
        (status = 400, description = "Parameter 'q' missing", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
pub async fn query_get(
    State(service): State<Arc<RagService>>,
    Query(params): Query<QueryParams>,
) -> RagResult<Json<QueryResponse>> {
    let request: QueryRequest = params
        .into_request()
        .ok_or_else(|| RagError::Validation("Parameter 'q' is required".to_string()))?;

    Ok(Json(service.query(request).await?))
}

/// List stored documents
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    tag = "documents",
    params(ListParams),
    responses(
        (status = 200, description = "Stored documents", body = DocumentList),
        (status = 500, description = "Vector store error", body = ErrorResponse)
    )
)]
pub async fn list_documents(
    State(service): State<Arc<RagService>>,
    Query(params): Query<ListParams>,
) -> RagResult<Json<DocumentList>> {
    Ok(Json(service.list_documents(params.limit()).await?))
}

/// List stored documents with the given source
#[utoipa::path(
    get,
    path = "/api/v1/documents/source/{source}",
    tag = "documents",
    params(
        ("source" = String, Path, description = "Source label, e.g. a file name"),
        ListParams
    ),
    responses(
        (status = 200, description = "Documents for the source", body = DocumentList),
        (status = 500, description = "Vector store error", body = ErrorResponse)
    )
)]
pub async fn documents_by_source(
    State(service): State<Arc<RagService>>,
    Path(source): Path<String>,
    Query(params): Query<ListParams>,
) -> RagResult<Json<DocumentList>> {
    Ok(Json(service.documents_by_source(&source, params.limit()).await?))
}

/// Delete one document
#[utoipa::path(
    delete,
    path = "/api/v1/documents/{id}",
    tag = "documents",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 500, description = "Vector store error", body = ErrorResponse)
    )
)]
pub async fn delete_document(
    State(service): State<Arc<RagService>>,
    Path(id): Path<String>,
) -> RagResult<StatusCode> {
    service.delete_document(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
