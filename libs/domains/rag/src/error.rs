use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Vector store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RagResult<T> = Result<T, RagError>;

impl From<qdrant_client::QdrantError> for RagError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        RagError::Store(err.to_string())
    }
}

impl From<ConfigError> for RagError {
    fn from(err: ConfigError) -> Self {
        RagError::Config(err.to_string())
    }
}

/// Convert RagError to AppError for standardized HTTP error responses
impl From<RagError> for AppError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::Validation(msg) => AppError::BadRequest(msg),
            RagError::NotFound(msg) => AppError::NotFound(msg),
            RagError::Embedding(msg) => AppError::Upstream(format!("Embedding error: {}", msg)),
            RagError::Completion(msg) => AppError::Upstream(format!("Completion error: {}", msg)),
            RagError::Store(msg) => AppError::Store(msg),
            RagError::Config(msg) => AppError::InternalServerError(format!("Config error: {}", msg)),
            RagError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RagError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
