use async_trait::async_trait;

use crate::error::RagResult;
use crate::models::RelevantDocument;

/// Answers a question from retrieved context
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Only documents scoring at least `min_score` are used as context.
    /// With none left the model answers from general knowledge.
    async fn complete(
        &self,
        query: &str,
        relevant_docs: &[RelevantDocument],
        min_score: f32,
    ) -> RagResult<String>;
}
