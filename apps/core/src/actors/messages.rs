use std::time::Duration;
use tokio::sync::oneshot;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// One chat-completion call: the prompts plus the sampling parameters for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Deadline for this single attempt.
    pub timeout: Duration,
}

/// Messages that can be sent to the `LlmActor`.
#[derive(Debug)]
pub enum LlmMessage {
    /// A request for a complete (non-streamed) text response.
    Complete {
        request: CompletionRequest,
        /// A channel to send the final `String` result back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}
