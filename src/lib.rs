pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    AnswerQueryUseCase, EmbeddingService, IngestDocumentUseCase, QueryLog,
    SearchDocumentsUseCase, VectorStore, DEFAULT_TOP_K,
};

pub use connector::{
    CachedEmbedding, ChannelQueryLog, HfEmbedding, InMemoryVectorStore, MockEmbedding,
};

pub use domain::{
    AnswerSelector, Document, DomainError, Embedding, EmbeddingConfig, QueryResponse, SearchResult,
};
