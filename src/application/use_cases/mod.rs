mod answer_query;
mod ingest_document;
mod search_documents;

pub use answer_query::*;
pub use ingest_document::*;
pub use search_documents::*;
