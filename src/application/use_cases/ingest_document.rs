use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{EmbeddingService, VectorStore};
use crate::domain::{Document, DomainError};

pub struct IngestDocumentUseCase {
    embedding_service: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
}

impl IngestDocumentUseCase {
    pub fn new(
        embedding_service: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            embedding_service,
            vector_store,
        }
    }

    /// Embed `document.text` and upsert the entry.
    ///
    /// The store is touched only after a successful embedding, so a failed
    /// embedding never creates or replaces an entry.
    pub async fn execute(&self, document: &Document) -> Result<(), DomainError> {
        if document.id.trim().is_empty() {
            return Err(DomainError::invalid_input("Document id must not be empty"));
        }
        if document.text.trim().is_empty() {
            return Err(DomainError::invalid_input(format!(
                "Document {} has empty text",
                document.id
            )));
        }

        let embedding = self.embedding_service.embed(&document.text).await?;
        self.vector_store.upsert(document, &embedding).await?;

        debug!(
            "Ingested document {} ({} dimensions)",
            document.id,
            embedding.dimensions()
        );
        Ok(())
    }

    /// Ingest documents in order, failing on the first error.
    ///
    /// Each document is individually atomic; documents ingested before a
    /// failure remain in the store.
    pub async fn execute_batch(&self, documents: &[Document]) -> Result<usize, DomainError> {
        for document in documents {
            self.execute(document).await?;
        }

        info!("Ingested {} documents", documents.len());
        Ok(documents.len())
    }
}
