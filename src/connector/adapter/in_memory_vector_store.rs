use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::application::VectorStore;
use crate::domain::{Document, DomainError, Embedding, SearchResult};

struct StoredEntry {
    document: Document,
    vector: Vec<f32>,
    /// Insertion sequence, assigned on first insert of an id and preserved
    /// across replacing upserts. Breaks ranking ties deterministically.
    seq: u64,
}

struct StoreInner {
    entries: HashMap<String, StoredEntry>,
    /// Vector dimensionality, fixed by the first successful upsert for the
    /// lifetime of the store.
    dimensions: Option<usize>,
    next_seq: u64,
}

/// Exact linear-scan vector store over an in-process map.
///
/// Ranking is by descending cosine similarity; equal scores rank by
/// insertion order. A single `RwLock` guards the whole state, so upserts
/// are atomic per id and readers never observe a partially written entry.
pub struct InMemoryVectorStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                entries: HashMap::new(),
                dimensions: None,
                next_seq: 0,
            }),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(&self, document: &Document, embedding: &Embedding) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        match inner.dimensions {
            Some(expected) if embedding.dimensions() != expected => {
                return Err(DomainError::dimension_mismatch(
                    expected,
                    embedding.dimensions(),
                ));
            }
            Some(_) => {}
            None => inner.dimensions = Some(embedding.dimensions()),
        }

        let seq = if let Some(existing) = inner.entries.get(&document.id) {
            existing.seq
        } else {
            let seq = inner.next_seq;
            inner.next_seq += 1;
            seq
        };

        inner.entries.insert(
            document.id.clone(),
            StoredEntry {
                document: document.clone(),
                vector: embedding.vector.clone(),
                seq,
            },
        );

        debug!(
            "Upserted document {} ({} entries in store)",
            document.id,
            inner.entries.len()
        );
        Ok(())
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let inner = self.inner.read().await;

        // An empty store answers every query with no results, even before
        // any dimensionality has been established.
        if inner.entries.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(expected) = inner.dimensions {
            if embedding.len() != expected {
                return Err(DomainError::dimension_mismatch(expected, embedding.len()));
            }
        }

        let mut scored: Vec<(&StoredEntry, f32)> = inner
            .entries
            .values()
            .map(|entry| (entry, cosine_similarity(embedding, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.seq.cmp(&b.0.seq))
        });

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(entry, score)| {
                SearchResult::new(
                    entry.document.id.clone(),
                    entry.document.text.clone(),
                    entry.document.metadata.clone(),
                    score,
                )
            })
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;
        Ok(inner.entries.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.entries.len())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
