use async_trait::async_trait;

use crate::error::RagResult;
use crate::models::{CollectionStats, Document, RelevantDocument};

/// Repository trait for the document collection in the vector store
///
/// Every call is an independent remote request. Ranking and filtering are
/// done by the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Create the collection if it does not exist yet
    async fn ensure_collection(&self) -> RagResult<()>;

    /// Store one document under its id, replacing any previous version
    async fn upsert(&self, document: &Document, vector: Vec<f32>) -> RagResult<()>;

    /// Nearest neighbours of `vector` scoring at least `score_threshold`, best first
    async fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> RagResult<Vec<RelevantDocument>>;

    /// Stored documents, optionally only those with the given `source`
    async fn scroll(&self, limit: u32, source: Option<String>) -> RagResult<Vec<Document>>;

    async fn delete(&self, id: &str) -> RagResult<()>;

    async fn collection_info(&self) -> RagResult<CollectionStats>;
}
