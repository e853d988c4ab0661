use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single ranked hit from a similarity search.
///
/// Serializes flat (`{"id", "text", "metadata", "score"}`), which is also
/// the wire shape inside the Response body at the HTTP boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    id: String,
    text: String,
    metadata: HashMap<String, String>,
    score: f32,
}

impl SearchResult {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        metadata: HashMap<String, String>,
        score: f32,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata,
            score,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn category(&self) -> &str {
        self.metadata
            .get("category")
            .map(String::as_str)
            .unwrap_or("uncategorized")
    }

    /// Similarity expressed as a percentage, as printed by the console loop.
    pub fn score_percent(&self) -> f32 {
        self.score * 100.0
    }

    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.text.to_lowercase().contains(&phrase.to_lowercase())
    }

    pub fn display_line(&self, rank: usize) -> String {
        format!(
            "{}. {} ({}) - Score: {:.2}%",
            rank,
            self.text,
            self.category(),
            self.score_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(score: f32) -> SearchResult {
        let mut metadata = HashMap::new();
        metadata.insert("category".to_string(), "science".to_string());
        SearchResult::new(
            "doc1",
            "Albert Einstein developed the theory of relativity.",
            metadata,
            score,
        )
    }

    #[test]
    fn test_display_line_format() {
        let result = sample_result(0.87654);

        assert_eq!(
            result.display_line(1),
            "1. Albert Einstein developed the theory of relativity. (science) - Score: 87.65%"
        );
    }

    #[test]
    fn test_contains_phrase_is_case_insensitive() {
        let result = sample_result(0.9);

        assert!(result.contains_phrase("ALBERT EINSTEIN"));
        assert!(!result.contains_phrase("isaac newton"));
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let result = sample_result(0.5);
        let json = serde_json::to_value(&result).expect("serialize");

        assert!(json.get("id").is_some());
        assert!(json.get("text").is_some());
        assert!(json.get("metadata").is_some());
        assert!(json.get("score").is_some());
    }
}
