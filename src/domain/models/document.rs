use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A text passage held in the vector store, keyed by a caller-supplied id.
///
/// Upserting a document with an existing id replaces the stored entry
/// wholesale; there is no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Category label used by the console display; documents without one
    /// render as "uncategorized".
    pub fn category(&self) -> &str {
        self.metadata
            .get("category")
            .map(String::as_str)
            .unwrap_or("uncategorized")
    }

    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }
}
