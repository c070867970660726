//! MailSort core: classifies corporate emails as productive or unproductive and
//! drafts a suggested reply through an OpenAI-compatible chat model.

pub mod actors;
pub mod brain;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod text_extract;

#[cfg(test)]
mod tests;

pub use config::{ModelAvailability, Settings};
pub use engine::{ClassificationEngine, PipelineStage};
pub use error::{AppError, ParseError};
pub use models::{Category, ClassificationResult, ClassificationVerdict};
