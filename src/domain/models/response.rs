use serde::{Deserialize, Serialize};

use super::SearchResult;

/// The outcome of one retrieval call: a single selected response string
/// plus the full ranked candidate list it was chosen from.
///
/// Serialized as-is at the system boundary:
/// `{ "response": "...", "results": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    response: String,
    results: Vec<SearchResult>,
}

impl QueryResponse {
    pub fn new(response: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            response: response.into(),
            results,
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn top_result(&self) -> Option<&SearchResult> {
        self.results.first()
    }
}
