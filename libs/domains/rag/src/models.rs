use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_THRESHOLD: f32 = 0.7;
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// A unit of indexed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    /// Assigned as a UUIDv4 when empty
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    /// Free-form origin label, usually a file name
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            source: source.into(),
            metadata: BTreeMap::new(),
            created: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Give the document an id if it has none. Existing ids are never replaced.
    pub fn ensure_id(&mut self) -> &str {
        if self.id.trim().is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        &self.id
    }
}

/// A search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RelevantDocument {
    pub document: Document,
    /// Similarity score, higher is more relevant
    pub score: f32,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("query must not be empty".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct QueryRequest {
    #[validate(custom(function = "not_blank"))]
    pub query: String,
    /// Maximum number of documents to retrieve (default 5)
    #[serde(default)]
    pub top_k: Option<i64>,
    /// Minimum similarity score (default 0.7)
    #[serde(default)]
    pub threshold: Option<f32>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
            threshold: None,
        }
    }

    pub fn with_top_k(mut self, top_k: i64) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// `top_k` and `threshold` with missing, zero and negative values replaced by defaults
    pub fn normalized(&self) -> (usize, f32) {
        let top_k = match self.top_k {
            Some(k) if k > 0 => k as usize,
            _ => DEFAULT_TOP_K,
        };
        let threshold = match self.threshold {
            Some(t) if t > 0.0 && t.is_finite() => t,
            _ => DEFAULT_THRESHOLD,
        };
        (top_k, threshold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryResponse {
    pub answer: String,
    /// In the order returned by the vector store
    pub relevant_docs: Vec<RelevantDocument>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct IndexRequest {
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndexResponse {
    /// True when no document failed
    pub success: bool,
    pub indexed_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_docs: Vec<String>,
    /// Human readable duration, e.g. `1.234ms`
    pub processing_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CollectionStats {
    pub name: String,
    pub status: String,
    pub points_count: u64,
    pub vector_size: u64,
    pub distance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentList {
    pub documents: Vec<Document>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl DocumentList {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            count: documents.len(),
            documents,
            source: None,
        }
    }

    pub fn for_source(documents: Vec<Document>, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::new(documents)
        }
    }
}

/// Query string of `GET /query`. Values are kept raw so unparsable numbers fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueryParams {
    /// Query text
    pub q: Option<String>,
    pub top_k: Option<String>,
    pub threshold: Option<String>,
}

impl QueryParams {
    /// `None` when `q` is missing or blank
    pub fn into_request(self) -> Option<QueryRequest> {
        let query = self.q.filter(|q| !q.trim().is_empty())?;
        Some(QueryRequest {
            query,
            top_k: self.top_k.and_then(|s| s.trim().parse().ok()),
            threshold: self.threshold.and_then(|s| s.trim().parse().ok()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Maximum number of documents (default 100)
    #[param(value_type = Option<u32>)]
    pub limit: Option<String>,
}

impl ListParams {
    /// Parsed `limit`; unparsable values count as missing
    pub fn limit(&self) -> Option<u32> {
        self.limit.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_zero_parameters_are_equivalent() {
        let missing = QueryRequest::new("q");
        let zeros = QueryRequest::new("q").with_top_k(0).with_threshold(0.0);
        let negative = QueryRequest::new("q").with_top_k(-3).with_threshold(-1.0);

        assert_eq!(missing.normalized(), (5, 0.7));
        assert_eq!(zeros.normalized(), missing.normalized());
        assert_eq!(negative.normalized(), missing.normalized());
    }

    #[test]
    fn test_explicit_parameters_kept() {
        let request = QueryRequest::new("q").with_top_k(3).with_threshold(0.25);
        assert_eq!(request.normalized(), (3, 0.25));
    }

    #[test]
    fn test_blank_query_fails_validation() {
        assert!(QueryRequest::new("   ").validate().is_err());
        assert!(QueryRequest::new("what is Rust").validate().is_ok());
    }

    #[test]
    fn test_ensure_id_keeps_existing() {
        let mut doc = Document::new("text", "a.txt").with_id("42");
        assert_eq!(doc.ensure_id(), "42");

        let mut doc = Document::new("text", "a.txt").with_id("");
        let id = doc.ensure_id().to_string();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_document_defaults_when_deserializing() {
        let doc: Document = serde_json::from_str(r#"{"content":"hello"}"#).unwrap();
        assert!(doc.id.is_empty());
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.source, "");
    }

    #[test]
    fn test_failed_docs_omitted_when_empty() {
        let response = IndexResponse {
            success: true,
            indexed_count: 2,
            failed_docs: vec![],
            processing_time: "1ms".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("failed_docs").is_none());
    }

    #[test]
    fn test_query_params_fallbacks() {
        let params = QueryParams {
            q: Some("rust".into()),
            top_k: Some("abc".into()),
            threshold: Some("0.4".into()),
        };
        let request = params.into_request().unwrap();
        assert_eq!(request.normalized(), (5, 0.4));

        let params = QueryParams {
            q: Some("  ".into()),
            ..QueryParams::default()
        };
        assert!(params.into_request().is_none());
    }

    #[test]
    fn test_list_params_unparsable_limit_is_missing() {
        let limit = |raw: &str| {
            ListParams {
                limit: Some(raw.to_string()),
            }
            .limit()
        };

        assert_eq!(limit("25"), Some(25));
        assert_eq!(limit("abc"), None);
        assert_eq!(limit("-1"), None);
        assert_eq!(ListParams::default().limit(), None);
    }
}
