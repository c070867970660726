//! Actor plumbing around the remote model.

pub mod llm;
pub mod messages;
pub mod traits;
