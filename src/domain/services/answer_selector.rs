use crate::domain::{QueryResponse, SearchResult};

/// Response text returned when the ranked list is empty.
pub const NO_MATCH_RESPONSE: &str = "I couldn't find relevant information for your query.";

/// Phrase that switches the response framing when it appears in both the
/// query and the top result.
pub const DEFAULT_TRIGGER_PHRASE: &str = "albert einstein";

/// Turns a ranked result list into a single presented response string.
///
/// This is a deterministic string-template selection over the single best
/// match, not answer synthesis: no extraction, no summarization, no
/// confidence thresholding. The trigger-phrase special case is demo
/// placeholder logic for one named entity, kept as observed; it does not
/// generalize to a relevance signal and should not be extended as if it
/// were one.
#[derive(Debug, Clone)]
pub struct AnswerSelector {
    trigger_phrase: String,
}

impl AnswerSelector {
    pub fn new() -> Self {
        Self {
            trigger_phrase: DEFAULT_TRIGGER_PHRASE.to_string(),
        }
    }

    pub fn with_trigger_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.trigger_phrase = phrase.into().to_lowercase();
        self
    }

    pub fn trigger_phrase(&self) -> &str {
        &self.trigger_phrase
    }

    /// Select a response for `query` from `results`.
    ///
    /// Empty results are a handled case, never an error. The full ranked
    /// list is carried into the response regardless of framing.
    pub fn select(&self, query: &str, results: Vec<SearchResult>) -> QueryResponse {
        let Some(top) = results.first() else {
            return QueryResponse::new(NO_MATCH_RESPONSE, results);
        };

        let response = if query.to_lowercase().contains(&self.trigger_phrase)
            && top.contains_phrase(&self.trigger_phrase)
        {
            format!("Based on my knowledge, {}", top.text())
        } else {
            format!("Here's what I found: {}", top.text())
        };

        QueryResponse::new(response, results)
    }
}

impl Default for AnswerSelector {
    fn default() -> Self {
        Self::new()
    }
}
