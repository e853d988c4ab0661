mod cached_embedding;
mod channel_query_log;
mod hf_embedding;
mod in_memory_vector_store;
mod mock_embedding;

pub use cached_embedding::*;
pub use channel_query_log::*;
pub use hf_embedding::*;
pub use in_memory_vector_store::*;
pub use mock_embedding::*;
