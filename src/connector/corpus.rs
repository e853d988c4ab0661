use std::path::Path;

use tracing::info;

use crate::domain::{Document, DomainError};

/// Built-in sample corpus, compiled into the binary so every entry point
/// works on a populated store without any setup.
const SAMPLE_CORPUS: &str = include_str!("../../data/sample_documents.json");

/// Load documents for seeding: a user-supplied JSON file when `path` is
/// given, the built-in sample corpus otherwise.
///
/// The file format is a JSON array of `{"id", "text", "metadata"?}`
/// objects, the serde shape of [`Document`].
pub fn load_corpus(path: Option<&Path>) -> Result<Vec<Document>, DomainError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let documents: Vec<Document> = serde_json::from_str(&raw).map_err(|e| {
                DomainError::invalid_input(format!(
                    "Failed to parse corpus file {}: {e}",
                    path.display()
                ))
            })?;

            info!(
                "Loaded {} documents from {}",
                documents.len(),
                path.display()
            );
            Ok(documents)
        }
        None => serde_json::from_str(SAMPLE_CORPUS)
            .map_err(|e| DomainError::internal(format!("Built-in corpus is invalid: {e}"))),
    }
}
