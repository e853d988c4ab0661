mod document;
mod embedding;
mod response;
mod search_result;

pub use document::*;
pub use embedding::*;
pub use response::*;
pub use search_result::*;
