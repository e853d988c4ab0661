use crate::application::use_cases::SearchDocumentsUseCase;
use crate::domain::{AnswerSelector, DomainError, QueryResponse};

/// Runs the full retrieval pipeline: search, then phrase the top hit as a
/// response.
pub struct AnswerQueryUseCase {
    search: SearchDocumentsUseCase,
    selector: AnswerSelector,
}

impl AnswerQueryUseCase {
    pub fn new(search: SearchDocumentsUseCase, selector: AnswerSelector) -> Self {
        Self { search, selector }
    }

    pub async fn execute(&self, query: &str, k: usize) -> Result<QueryResponse, DomainError> {
        let results = self.search.execute(query, k).await?;
        Ok(self.selector.select(query, results))
    }
}
