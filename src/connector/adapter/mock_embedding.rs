use async_trait::async_trait;
use rand::Rng;
use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

use crate::application::EmbeddingService;
use crate::domain::{DomainError, Embedding, EmbeddingConfig};

/// Deterministic stand-in for a real embedding provider.
///
/// Hashes the input text into a seed and draws a normalized random vector
/// from it, so the same text always maps to the same embedding without any
/// network access.
pub struct MockEmbedding {
    config: EmbeddingConfig,
}

impl MockEmbedding {
    pub fn new() -> Self {
        Self {
            config: EmbeddingConfig::new("mock-embedding".to_string(), 384, 512),
        }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            config: EmbeddingConfig::new("mock-embedding".to_string(), dimensions, 512),
        }
    }

    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut vector: Vec<f32> = (0..self.config.dimensions)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for x in &mut vector {
                *x /= magnitude;
            }
        }

        vector
    }
}

impl Default for MockEmbedding {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingService for MockEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::embedding_provider("Cannot embed empty text"));
        }

        let vector = self.generate_embedding(text);

        debug!("Generated mock embedding with {} dimensions", vector.len());

        Ok(Embedding::new(vector, self.config.model_name.clone()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }

        debug!("Generated {} mock embeddings", results.len());

        Ok(results)
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embedding_consistency() {
        let service = MockEmbedding::new();

        let embedding1 = service.embed("hello world").await.unwrap();
        let embedding2 = service.embed("hello world").await.unwrap();

        assert_eq!(embedding1.vector, embedding2.vector);
    }

    #[tokio::test]
    async fn test_mock_embedding_dimensions() {
        let service = MockEmbedding::with_dimensions(128);

        let embedding = service.embed("test").await.unwrap();

        assert_eq!(embedding.dimensions(), 128);
    }

    #[tokio::test]
    async fn test_mock_embedding_normalized() {
        let service = MockEmbedding::new();

        let embedding = service.embed("test").await.unwrap();
        let magnitude: f32 = embedding.vector.iter().map(|x| x * x).sum::<f32>().sqrt();

        assert!((magnitude - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_mock_embedding_distinct_texts_differ() {
        let service = MockEmbedding::new();

        let first = service.embed("first text").await.unwrap();
        let second = service.embed("second text").await.unwrap();

        assert_ne!(first.vector, second.vector);
    }

    #[tokio::test]
    async fn test_mock_embedding_rejects_empty_text() {
        let service = MockEmbedding::new();

        let result = service.embed("   ").await;

        assert!(result.is_err());
        assert!(result.unwrap_err().is_embedding_provider());
    }
}
