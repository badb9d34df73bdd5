//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1099)
    /// Request validation failed
    ValidationError,

    /// Request was malformed (missing or unparsable parameters)
    BadRequest,

    /// Requested resource was not found
    NotFound,

    /// JSON extraction from request body failed
    JsonExtraction,

    // Server errors (1100-1199)
    /// An unexpected internal server error occurred
    InternalError,

    /// JSON (de)serialization failed on the server side
    SerdeJsonError,

    // Upstream errors (1200-1299)
    /// A remote model API (embeddings or completions) failed
    UpstreamError,

    /// The remote vector store rejected or failed a request
    StoreError,
}

impl ErrorCode {
    /// String identifier sent to clients
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::SerdeJsonError => "SERDE_JSON_ERROR",
            ErrorCode::UpstreamError => "UPSTREAM_ERROR",
            ErrorCode::StoreError => "STORE_ERROR",
        }
    }

    /// Integer code for logs and dashboards
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::BadRequest => 1002,
            ErrorCode::NotFound => 1004,
            ErrorCode::JsonExtraction => 1005,
            ErrorCode::InternalError => 1100,
            ErrorCode::SerdeJsonError => 1102,
            ErrorCode::UpstreamError => 1200,
            ErrorCode::StoreError => 1201,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::BadRequest => "Bad request",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::JsonExtraction => "Invalid JSON request body",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::SerdeJsonError => "Internal server error",
            ErrorCode::UpstreamError => "Internal server error",
            ErrorCode::StoreError => "Internal server error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
