mod embedding_service;
mod query_log;
mod vector_store;

pub use embedding_service::*;
pub use query_log::*;
pub use vector_store::*;
