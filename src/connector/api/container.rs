use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::application::{
    AnswerQueryUseCase, EmbeddingService, IngestDocumentUseCase, SearchDocumentsUseCase,
    VectorStore,
};
use crate::connector::adapter::{CachedEmbedding, HfEmbedding, InMemoryVectorStore, MockEmbedding};
use crate::connector::corpus::load_corpus;
use crate::domain::AnswerSelector;

pub struct ContainerConfig {
    /// Use the deterministic mock provider instead of the Hugging Face API.
    pub mock_embeddings: bool,
    /// Embedding model override; `None` keeps the provider default.
    pub model: Option<String>,
    /// Corpus file for seeding; `None` uses the built-in sample corpus.
    pub documents: Option<PathBuf>,
}

pub struct Container {
    embedding_service: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let provider: Arc<dyn EmbeddingService> = if config.mock_embeddings {
            debug!("Using mock embedding service");
            Arc::new(MockEmbedding::new())
        } else {
            debug!("Using Hugging Face embedding service");
            Arc::new(HfEmbedding::from_env(config.model.clone()))
        };

        // Embeddings are deterministic, so every provider sits behind the
        // text-keyed cache.
        let embedding_service: Arc<dyn EmbeddingService> =
            Arc::new(CachedEmbedding::new(provider));
        let vector_store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new());

        Self {
            embedding_service,
            vector_store,
            config,
        }
    }

    /// Ingest the configured corpus so queries run against a populated
    /// store. Called once by every entry point before accepting queries.
    pub async fn seed(&self) -> Result<usize> {
        let documents = load_corpus(self.config.documents.as_deref())?;
        let count = self.ingest_use_case().execute_batch(&documents).await?;

        info!("Seeded vector store with {} documents", count);
        Ok(count)
    }

    pub fn ingest_use_case(&self) -> IngestDocumentUseCase {
        IngestDocumentUseCase::new(self.embedding_service.clone(), self.vector_store.clone())
    }

    pub fn search_use_case(&self) -> SearchDocumentsUseCase {
        SearchDocumentsUseCase::new(self.embedding_service.clone(), self.vector_store.clone())
    }

    pub fn answer_use_case(&self) -> AnswerQueryUseCase {
        AnswerQueryUseCase::new(self.search_use_case(), AnswerSelector::default())
    }

    pub fn vector_store(&self) -> Arc<dyn VectorStore> {
        self.vector_store.clone()
    }
}
