//! Application layer: trait seams toward the infrastructure and the use
//! cases that orchestrate the domain through them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
