use async_trait::async_trait;

use crate::error::RagResult;

/// Turns text into a fixed-length vector
///
/// The vector length must match the collection's configured dimension.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> RagResult<Vec<f32>>;
}
