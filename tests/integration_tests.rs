//! Integration tests for the retrieval pipeline.
//!
//! These exercise ingestion, search, and answer selection end to end over
//! the deterministic mock embedding provider.

use std::sync::Arc;

use async_trait::async_trait;
use semsearch::{
    AnswerQueryUseCase, AnswerSelector, Document, DomainError, Embedding, EmbeddingConfig,
    EmbeddingService, IngestDocumentUseCase, InMemoryVectorStore, MockEmbedding,
    SearchDocumentsUseCase, VectorStore, DEFAULT_TOP_K,
};

struct TestEnv {
    embedding_service: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
}

fn setup_test_env() -> TestEnv {
    TestEnv {
        embedding_service: Arc::new(MockEmbedding::new()),
        vector_store: Arc::new(InMemoryVectorStore::new()),
    }
}

impl TestEnv {
    fn ingest_use_case(&self) -> IngestDocumentUseCase {
        IngestDocumentUseCase::new(self.embedding_service.clone(), self.vector_store.clone())
    }

    fn search_use_case(&self) -> SearchDocumentsUseCase {
        SearchDocumentsUseCase::new(self.embedding_service.clone(), self.vector_store.clone())
    }

    fn answer_use_case(&self) -> AnswerQueryUseCase {
        AnswerQueryUseCase::new(self.search_use_case(), AnswerSelector::default())
    }

    async fn ingest_all(&self, documents: &[Document]) {
        self.ingest_use_case()
            .execute_batch(documents)
            .await
            .expect("Failed to ingest documents");
    }
}

fn sample_documents() -> Vec<Document> {
    vec![
        Document::new(
            "doc1",
            "Node.js is a JavaScript runtime built on Chrome's V8 engine.",
        )
        .with_metadata("category", "technology"),
        Document::new(
            "doc2",
            "RAG enhances chatbot responses by retrieving relevant information.",
        )
        .with_metadata("category", "technology"),
    ]
}

#[tokio::test]
async fn test_exact_text_query_ranks_its_document_first() {
    let env = setup_test_env();
    env.ingest_all(&sample_documents()).await;

    // Identical text maps to an identical mock vector, so the document's
    // own text is its best possible query.
    let results = env
        .search_use_case()
        .execute(
            "RAG enhances chatbot responses by retrieving relevant information.",
            DEFAULT_TOP_K,
        )
        .await
        .expect("Search failed");

    assert_eq!(results[0].id(), "doc2");
    assert!((results[0].score() - 1.0).abs() < 0.001);
}

#[tokio::test]
async fn test_end_to_end_query_over_two_documents() {
    let env = setup_test_env();
    env.ingest_all(&sample_documents()).await;

    let response = env
        .answer_use_case()
        .execute("What is RAG?", DEFAULT_TOP_K)
        .await
        .expect("Query failed");

    assert!(!response.response().is_empty());
    assert_eq!(response.results().len(), 2);
    assert!(response.results().len() <= DEFAULT_TOP_K);

    let top = response.top_result().expect("Should have a top result");
    assert_eq!(
        response.response(),
        format!("Here's what I found: {}", top.text())
    );
}

#[tokio::test]
async fn test_search_is_deterministic() {
    let env = setup_test_env();
    env.ingest_all(&sample_documents()).await;

    let first = env
        .search_use_case()
        .execute("chatbot knowledge", DEFAULT_TOP_K)
        .await
        .expect("Search failed");
    let second = env
        .search_use_case()
        .execute("chatbot knowledge", DEFAULT_TOP_K)
        .await
        .expect("Search failed");

    let ids_and_scores =
        |results: &[semsearch::SearchResult]| -> Vec<(String, f32)> {
            results
                .iter()
                .map(|r| (r.id().to_string(), r.score()))
                .collect()
        };
    assert_eq!(ids_and_scores(&first), ids_and_scores(&second));
}

#[tokio::test]
async fn test_trigger_phrase_changes_response_framing() {
    let env = setup_test_env();
    env.ingest_all(&[
        Document::new("einstein", "Albert Einstein developed the theory of relativity.")
            .with_metadata("category", "science"),
    ])
    .await;

    let triggered = env
        .answer_use_case()
        .execute("Tell me about Albert Einstein", DEFAULT_TOP_K)
        .await
        .expect("Query failed");
    assert_eq!(
        triggered.response(),
        "Based on my knowledge, Albert Einstein developed the theory of relativity."
    );

    let plain = env
        .answer_use_case()
        .execute("Who created general relativity?", DEFAULT_TOP_K)
        .await
        .expect("Query failed");
    assert_eq!(
        plain.response(),
        "Here's what I found: Albert Einstein developed the theory of relativity."
    );
}

#[tokio::test]
async fn test_empty_store_yields_no_match_response() {
    let env = setup_test_env();

    let response = env
        .answer_use_case()
        .execute("anything at all", DEFAULT_TOP_K)
        .await
        .expect("Query failed");

    assert_eq!(
        response.response(),
        "I couldn't find relevant information for your query."
    );
    assert!(!response.has_results());
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let env = setup_test_env();
    env.ingest_all(&sample_documents()).await;

    let result = env.search_use_case().execute("   ", DEFAULT_TOP_K).await;

    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn test_zero_k_is_rejected() {
    let env = setup_test_env();
    env.ingest_all(&sample_documents()).await;

    let result = env.search_use_case().execute("valid query", 0).await;

    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn test_k_caps_result_count() {
    let env = setup_test_env();
    let documents: Vec<Document> = (0..5)
        .map(|i| Document::new(format!("doc{i}"), format!("passage number {i}")))
        .collect();
    env.ingest_all(&documents).await;

    let results = env
        .search_use_case()
        .execute("passage", 2)
        .await
        .expect("Search failed");

    assert_eq!(results.len(), 2);
    assert!(results[0].score() >= results[1].score());
}

#[tokio::test]
async fn test_reingesting_id_replaces_entry() {
    let env = setup_test_env();
    env.ingest_all(&[Document::new("doc1", "the original passage")])
        .await;
    env.ingest_all(&[Document::new("doc1", "the corrected passage")])
        .await;

    assert_eq!(env.vector_store.count().await.unwrap(), 1);

    let results = env
        .search_use_case()
        .execute("the corrected passage", 1)
        .await
        .expect("Search failed");
    assert_eq!(results[0].text(), "the corrected passage");
}

/// Embedding double with hand-placed vectors, so relevance ordering in the
/// test is controlled rather than an artifact of the hash-based mock.
struct StaticEmbedding {
    config: EmbeddingConfig,
    table: std::collections::HashMap<String, Vec<f32>>,
}

impl StaticEmbedding {
    fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            config: EmbeddingConfig::default(),
            table: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl EmbeddingService for StaticEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let vector = self
            .table
            .get(text)
            .cloned()
            .ok_or_else(|| DomainError::embedding_provider(format!("no vector for: {text}")))?;
        Ok(Embedding::new(vector, self.config.model_name.clone()))
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[tokio::test]
async fn test_query_retrieves_the_semantically_closest_document() {
    let doc1_text = "Node.js is a JavaScript runtime built on a browser engine";
    let doc2_text = "RAG enhances chatbot responses by retrieving relevant information";

    let embedding_service: Arc<dyn EmbeddingService> = Arc::new(StaticEmbedding::new(&[
        (doc1_text, vec![1.0, 0.0, 0.0]),
        (doc2_text, vec![0.0, 1.0, 0.0]),
        ("What is RAG?", vec![0.0, 0.9, 0.1]),
    ]));
    let vector_store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new());

    let ingest = IngestDocumentUseCase::new(embedding_service.clone(), vector_store.clone());
    ingest
        .execute_batch(&[
            Document::new("doc1", doc1_text),
            Document::new("doc2", doc2_text),
        ])
        .await
        .expect("Failed to ingest documents");

    let answer = AnswerQueryUseCase::new(
        SearchDocumentsUseCase::new(embedding_service, vector_store),
        AnswerSelector::default(),
    );
    let response = answer
        .execute("What is RAG?", 1)
        .await
        .expect("Query failed");

    assert_eq!(response.results().len(), 1);
    assert_eq!(response.results()[0].id(), "doc2");
    assert_eq!(response.results()[0].text(), doc2_text);
    assert_eq!(
        response.response(),
        format!("Here's what I found: {doc2_text}")
    );
}

/// Embedding double that always fails, for exercising failure paths.
struct FailingEmbedding {
    config: EmbeddingConfig,
}

impl FailingEmbedding {
    fn new() -> Self {
        Self {
            config: EmbeddingConfig::default(),
        }
    }
}

#[async_trait]
impl EmbeddingService for FailingEmbedding {
    async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
        Err(DomainError::embedding_provider("provider offline"))
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[tokio::test]
async fn test_embedding_failure_leaves_store_untouched() {
    let env = setup_test_env();
    env.ingest_all(&[Document::new("doc1", "an existing passage")])
        .await;

    let failing_ingest =
        IngestDocumentUseCase::new(Arc::new(FailingEmbedding::new()), env.vector_store.clone());
    let result = failing_ingest
        .execute(&Document::new("doc2", "never makes it in"))
        .await;

    assert!(matches!(result, Err(DomainError::EmbeddingProvider(_))));
    assert_eq!(env.vector_store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_search_fails_closed_on_embedding_failure() {
    let env = setup_test_env();
    env.ingest_all(&sample_documents()).await;

    let failing_search =
        SearchDocumentsUseCase::new(Arc::new(FailingEmbedding::new()), env.vector_store.clone());
    let result = failing_search.execute("What is RAG?", DEFAULT_TOP_K).await;

    assert!(matches!(result, Err(DomainError::EmbeddingProvider(_))));
}
