use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::EmbeddingService;
use crate::domain::{DomainError, Embedding, EmbeddingConfig};

/// Default target: the hosted Hugging Face Inference API.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const FEATURE_EXTRACTION_PATH: &str = "/pipeline/feature-extraction";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    inputs: &'a [&'a str],
}

/// HTTP client for the Hugging Face feature-extraction pipeline (and
/// compatible endpoints such as self-hosted text-embeddings-inference).
///
/// Implements [`EmbeddingService`] so the ingestion and retrieval pipelines
/// stay decoupled from transport and serialization details.
///
/// Configuration comes from the environment:
///
/// ```text
/// HF_API_TOKEN=hf_...
/// HF_BASE_URL=https://api-inference.huggingface.co
/// ```
///
/// Requests time out after 30 seconds; timeouts and connection failures
/// surface as [`DomainError::EmbeddingProvider`] rather than hanging the
/// pipeline.
pub struct HfEmbedding {
    client: reqwest::Client,
    api_token: String,
    /// Full endpoint URL (base + pipeline path + model).
    url: String,
    config: EmbeddingConfig,
}

impl HfEmbedding {
    pub fn new(
        api_token: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let model: String = model.into();
        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');
        let url = format!("{trimmed}{FEATURE_EXTRACTION_PATH}/{model}");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_token: api_token.into(),
            url,
            config: EmbeddingConfig::new(model, 384, 512),
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable       | Default                               | Purpose                  |
    /// |----------------|---------------------------------------|--------------------------|
    /// | `HF_API_TOKEN` | `""` (empty)                          | Bearer token             |
    /// | `HF_BASE_URL`  | `https://api-inference.huggingface.co`| Hosted API / self-hosted |
    ///
    /// `model` overrides the default `sentence-transformers/all-MiniLM-L6-v2`.
    pub fn from_env(model: Option<String>) -> Self {
        let base = std::env::var("HF_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("HF_API_TOKEN").unwrap_or_default();
        let model = model.unwrap_or_else(|| EmbeddingConfig::default().model_name);
        Self::new(token, model, base)
    }

    async fn request_embeddings(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, DomainError> {
        let request = ApiRequest { inputs: texts };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::embedding_provider(format!(
                        "HfEmbedding: request timed out after {REQUEST_TIMEOUT_SECS}s"
                    ))
                } else if e.is_connect() {
                    DomainError::embedding_provider(format!(
                        "HfEmbedding: endpoint not reachable: {e}"
                    ))
                } else {
                    DomainError::embedding_provider(format!("HfEmbedding: request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("HfEmbedding: API returned {status}: {body}");
            return Err(DomainError::embedding_provider(format!(
                "HfEmbedding: API returned {status}"
            )));
        }

        let vectors: Vec<Vec<f32>> = response.json().await.map_err(|e| {
            DomainError::embedding_provider(format!("HfEmbedding: failed to parse response: {e}"))
        })?;

        if vectors.len() != texts.len() {
            return Err(DomainError::embedding_provider(format!(
                "HfEmbedding: expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingService for HfEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::embedding_provider("Cannot embed empty text"));
        }

        let mut vectors = self.request_embeddings(&[text]).await?;
        let vector = vectors
            .pop()
            .ok_or_else(|| DomainError::embedding_provider("HfEmbedding: empty response"))?;

        debug!(
            "Embedded {} chars into {} dimensions via {}",
            text.len(),
            vector.len(),
            self.config.model_name
        );

        Ok(Embedding::new(vector, self.config.model_name.clone()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(empty) = texts.iter().position(|t| t.trim().is_empty()) {
            return Err(DomainError::embedding_provider(format!(
                "Cannot embed empty text (input {empty})"
            )));
        }

        let vectors = self.request_embeddings(texts).await?;
        let embeddings = vectors
            .into_iter()
            .map(|vector| Embedding::new(vector, self.config.model_name.clone()))
            .collect::<Vec<_>>();

        debug!("Embedded batch of {} texts", embeddings.len());

        Ok(embeddings)
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}
