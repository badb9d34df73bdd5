use domain_rag::RagApiDoc;
use utoipa::OpenApi;

/// Service-level documentation: liveness endpoint and shared error schema
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RAG API",
        description = "Retrieval-augmented question answering over documents stored in Qdrant"
    ),
    paths(axum_helpers::server::health::health_handler),
    components(schemas(axum_helpers::HealthResponse, axum_helpers::ErrorResponse)),
    tags((name = "health", description = "Liveness probe"))
)]
struct ServiceDoc;

/// Combined OpenAPI document served at `/api-docs/openapi.json`
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(RagApiDoc::openapi());
        doc
    }
}
