use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::{EmbeddingService, VectorStore};
use crate::domain::{DomainError, SearchResult};

/// Result count used when the caller does not override it.
pub const DEFAULT_TOP_K: usize = 3;

pub struct SearchDocumentsUseCase {
    embedding_service: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
}

impl SearchDocumentsUseCase {
    pub fn new(
        embedding_service: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            embedding_service,
            vector_store,
        }
    }

    /// Embed the query and return the `k` nearest documents by cosine
    /// similarity, best first.
    pub async fn execute(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::invalid_input("Query must not be empty"));
        }
        if k == 0 {
            return Err(DomainError::invalid_input(
                "Result count must be at least 1",
            ));
        }

        info!("Searching for: {}", query);
        let start = Instant::now();

        let embedding = self.embedding_service.embed(query).await?;
        let results = self.vector_store.query(&embedding.vector, k).await?;

        debug!(
            "Found {} results in {:.2}ms",
            results.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(results)
    }
}
