use axum::Router;
use axum_helpers::server::health_router;
use core_config::AppInfo;
use domain_rag::{RagService, rag_router};
use std::sync::Arc;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Everything is versioned under `/v1`: `/api/v1/health` from the shared
/// health router, the rest from the RAG domain.
pub fn routes(service: Arc<RagService>, app: AppInfo) -> Router {
    Router::new().nest("/v1", health_router(app).merge(rag_router(service)))
}
