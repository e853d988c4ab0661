use async_trait::async_trait;

use crate::domain::{DomainError, Embedding, EmbeddingConfig};

/// Generates vector embeddings from passages and queries.
///
/// Implementations must be deterministic: the same (model, text) pair
/// yields the same vector, which keeps search results reproducible and
/// makes caching by text safe.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;

    /// Embed several texts. The default embeds sequentially; backends with
    /// native batching should override it.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn config(&self) -> &EmbeddingConfig;
}
