//! # Connector Layer
//!
//! External integrations implementing the application interfaces:
//! - Embedding generation (Hugging Face Inference API, deterministic mock,
//!   caching decorator)
//! - Vector storage (in-memory linear-scan store)
//! - Query logging (bounded channel with a tracing drain)
//! - HTTP service and dependency container
//! - Corpus loading

pub mod adapter;
pub mod api;
pub mod corpus;

pub use adapter::*;
