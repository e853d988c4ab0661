use async_trait::async_trait;

use crate::domain::{Document, DomainError, Embedding, SearchResult};

/// Keyed storage of (embedding, text, metadata) entries with
/// nearest-neighbor query.
///
/// All vectors in one store share a single dimensionality D, established
/// by the first successful upsert. Implementations must tolerate
/// concurrent reads and writes; an upsert is atomic per id, so readers
/// never observe a partially-updated entry.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert or replace the entry for `document.id`.
    ///
    /// Fails with `DomainError::DimensionMismatch` when the embedding's
    /// length disagrees with the store's established D, leaving the store
    /// unchanged.
    async fn upsert(&self, document: &Document, embedding: &Embedding)
        -> Result<(), DomainError>;

    /// Return the top-`k` entries by descending cosine similarity to
    /// `embedding`. Ties rank by insertion order (earlier first). An empty
    /// store returns an empty sequence, never an error.
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<SearchResult>, DomainError>;

    /// Remove the entry for `id`; returns whether one was present.
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
