use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::application::EmbeddingService;
use crate::domain::{DomainError, Embedding, EmbeddingConfig};

/// Caching decorator over any [`EmbeddingService`].
///
/// Embeddings are deterministic per (model, text), so caching by exact text
/// is safe. Repeated queries and re-seeded corpora skip provider round
/// trips. Entries live for the process; volume is bounded by corpus size
/// plus distinct queries.
pub struct CachedEmbedding {
    inner: Arc<dyn EmbeddingService>,
    cache: RwLock<HashMap<String, Vec<f32>>>,
}

impl CachedEmbedding {
    pub fn new(inner: Arc<dyn EmbeddingService>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl EmbeddingService for CachedEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        if let Some(vector) = self.cache.read().await.get(text) {
            debug!("Embedding cache hit ({} chars)", text.len());
            return Ok(Embedding::new(
                vector.clone(),
                self.inner.config().model_name.clone(),
            ));
        }

        let embedding = self.inner.embed(text).await?;
        self.cache
            .write()
            .await
            .insert(text.to_string(), embedding.vector.clone());

        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        let model = self.inner.config().model_name.clone();

        // Resolve hits up front so the provider only sees the misses.
        let mut resolved: Vec<Option<Embedding>> = Vec::with_capacity(texts.len());
        let mut missing: Vec<usize> = Vec::new();
        {
            let cache = self.cache.read().await;
            for (index, text) in texts.iter().enumerate() {
                match cache.get(*text) {
                    Some(vector) => resolved.push(Some(Embedding::new(vector.clone(), model.clone()))),
                    None => {
                        resolved.push(None);
                        missing.push(index);
                    }
                }
            }
        }

        if !missing.is_empty() {
            let missing_texts: Vec<&str> = missing.iter().map(|&i| texts[i]).collect();
            let fetched = self.inner.embed_batch(&missing_texts).await?;

            let mut cache = self.cache.write().await;
            for (&index, embedding) in missing.iter().zip(fetched.into_iter()) {
                cache.insert(texts[index].to_string(), embedding.vector.clone());
                resolved[index] = Some(embedding);
            }
        }

        debug!(
            "Embedded batch of {} texts ({} cache hits)",
            texts.len(),
            texts.len() - missing.len()
        );

        Ok(resolved.into_iter().flatten().collect())
    }

    fn config(&self) -> &EmbeddingConfig {
        self.inner.config()
    }
}
