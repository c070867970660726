use crate::actors::messages::{AppError, CompletionRequest};
use async_trait::async_trait;

/// Defines the public interface for a remote model actor.
///
/// This trait abstracts the completion backend so the engine can be driven by the
/// HTTP-backed actor in production and by in-memory mocks in tests.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Sends one system + user prompt pair and returns the model's raw text.
    ///
    /// Implementations must give up after `request.timeout` and report it as
    /// [`AppError::Timeout`], so a retry loop can count it against its budget.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError>;
}
