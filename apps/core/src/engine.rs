//! End-to-end classification pipeline.
//!
//! One call to [`ClassificationEngine::classify`] walks a request through
//! `validating → normalizing → classifying → responding → done`, dropping to
//! `error` from any stage. The engine only holds read-only state, so a single
//! instance can serve any number of concurrent requests.

use crate::actors::llm::LlmActorHandle;
use crate::actors::messages::CompletionRequest;
use crate::actors::traits::LlmActor;
use crate::brain::keywords::KeywordClassifier;
use crate::brain::normalizer::TextNormalizer;
use crate::brain::parser::parse_verdict;
use crate::brain::prompts::{
    classification_prompt, fallback_response, response_prompt, CLASSIFICATION_SYSTEM_PROMPT,
    RESPONSE_SYSTEM_PROMPT,
};
use crate::config::{ModelAvailability, Settings};
use crate::error::AppError;
use crate::models::{Category, ClassificationResult, ClassificationVerdict};
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Replies shorter than this (in characters) are treated as failed generations.
pub const MIN_RESPONSE_CHARS: usize = 20;

/// Where a request currently is in the pipeline. Used for log context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validating,
    Normalizing,
    Classifying,
    Responding,
    Done,
    Error,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Validating => "validating",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::Classifying => "classifying",
            PipelineStage::Responding => "responding",
            PipelineStage::Done => "done",
            PipelineStage::Error => "error",
        };
        f.write_str(name)
    }
}

/// Which classifier answers requests; fixed when the engine is built.
enum ModelBackend<L> {
    Remote(Arc<L>),
    Simulation,
}

/// Orchestrates normalization, prompting, the remote model and result assembly.
pub struct ClassificationEngine<L: LlmActor> {
    settings: Arc<Settings>,
    backend: ModelBackend<L>,
    normalizer: TextNormalizer,
    simulator: KeywordClassifier,
}

impl ClassificationEngine<LlmActorHandle> {
    /// Builds the production engine.
    ///
    /// Spawns the HTTP-backed actor when a credential is configured, otherwise the
    /// engine answers every request through the keyword heuristic.
    pub fn from_settings(settings: Arc<Settings>) -> Result<Self, AppError> {
        let backend = match settings.model_availability() {
            ModelAvailability::Remote => {
                ModelBackend::Remote(Arc::new(LlmActorHandle::new(&settings)?))
            }
            ModelAvailability::Simulation => ModelBackend::Simulation,
        };
        Ok(Self::with_backend(settings, backend))
    }
}

impl<L: LlmActor> ClassificationEngine<L> {
    /// Builds an engine around an existing model actor.
    pub fn with_llm(settings: Arc<Settings>, llm: Arc<L>) -> Self {
        Self::with_backend(settings, ModelBackend::Remote(llm))
    }

    /// Builds an engine that never calls a remote model.
    pub fn simulated(settings: Arc<Settings>) -> Self {
        Self::with_backend(settings, ModelBackend::Simulation)
    }

    fn with_backend(settings: Arc<Settings>, backend: ModelBackend<L>) -> Self {
        Self {
            settings,
            backend,
            normalizer: TextNormalizer::new(),
            simulator: KeywordClassifier::new(),
        }
    }

    pub fn availability(&self) -> ModelAvailability {
        match self.backend {
            ModelBackend::Remote(_) => ModelAvailability::Remote,
            ModelBackend::Simulation => ModelAvailability::Simulation,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Classifies one email and suggests a reply.
    ///
    /// Never returns an error and never panics: every failure, including a panic
    /// inside the pipeline, comes back as `success: false` with a message and the
    /// elapsed time.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4(), input_chars = email_text.chars().count()))]
    pub async fn classify(&self, email_text: &str) -> ClassificationResult {
        let started = Instant::now();

        debug!(stage = %PipelineStage::Validating, "Validating input");
        if let Err(e) = self.validate(email_text) {
            warn!(stage = %PipelineStage::Error, "Rejected input: {}", e);
            return ClassificationResult::failed(e.to_string(), Some(started.elapsed()));
        }

        let outcome = AssertUnwindSafe(self.run_pipeline(email_text))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok((verdict, suggested_response))) => {
                let elapsed = started.elapsed();
                info!(
                    stage = %PipelineStage::Done,
                    category = %verdict.category,
                    confidence = verdict.confidence,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Classification complete"
                );
                ClassificationResult::succeeded(verdict, suggested_response, elapsed)
            }
            Ok(Err(e)) => {
                error!(stage = %PipelineStage::Error, "Classification failed: {}", e);
                ClassificationResult::failed(
                    format!("Erro ao processar email: {}", e),
                    Some(started.elapsed()),
                )
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(stage = %PipelineStage::Error, "Classification pipeline panicked: {}", message);
                ClassificationResult::failed(
                    format!("Erro ao processar email: {}", message),
                    Some(started.elapsed()),
                )
            }
        }
    }

    fn validate(&self, email_text: &str) -> Result<(), AppError> {
        let min = self.settings.min_text_length;
        let max = self.settings.max_text_length;

        if email_text.trim().chars().count() < min {
            return Err(AppError::EmptyInput { min });
        }

        let actual = email_text.chars().count();
        if actual > max {
            return Err(AppError::TooLong { max, actual });
        }

        Ok(())
    }

    async fn run_pipeline(
        &self,
        email_text: &str,
    ) -> Result<(ClassificationVerdict, String), AppError> {
        debug!(stage = %PipelineStage::Normalizing, "Normalizing text");
        let stripped = self.normalizer.strip_signature(email_text);

        let llm = match &self.backend {
            ModelBackend::Remote(llm) => llm,
            ModelBackend::Simulation => {
                debug!(stage = %PipelineStage::Classifying, "No remote model configured, simulating");
                let verdict = self.simulate(&stripped);
                let reply = fallback_response(verdict.category).to_string();
                return Ok((verdict, reply));
            }
        };

        let reduced = self.normalizer.reduce_for_classification(&stripped);
        debug!(reduced_chars = reduced.chars().count(), "Text reduced for classification");

        debug!(stage = %PipelineStage::Classifying, "Classifying");
        let verdict = self.classify_remote(llm.as_ref(), &reduced).await?;

        debug!(stage = %PipelineStage::Responding, "Generating reply");
        let reply = self
            .generate_remote(llm.as_ref(), &stripped, verdict.category)
            .await;

        Ok((verdict, reply))
    }

    /// Deterministic keyword heuristic; never touches the network.
    pub fn simulate(&self, text: &str) -> ClassificationVerdict {
        self.simulator.classify(text)
    }

    /// Classifies `text` with the remote model, retrying with linear backoff.
    ///
    /// Only transient errors are retried. Fails with [`AppError::RetriesExhausted`]
    /// carrying the last error once every attempt has failed, with a non-retryable
    /// error as soon as one occurs, or with [`AppError::Config`] when no model is
    /// configured.
    pub async fn classify_with_retry(&self, text: &str) -> Result<ClassificationVerdict, AppError> {
        match &self.backend {
            ModelBackend::Remote(llm) => self.classify_remote(llm.as_ref(), text).await,
            ModelBackend::Simulation => Err(AppError::Config(
                "No remote model configured for classification".to_string(),
            )),
        }
    }

    /// Generates a reply with the remote model, retrying with half-unit backoff.
    ///
    /// Never fails: once attempts run out (or with no model at all) the canned
    /// reply for `category` is returned.
    pub async fn generate_response_with_retry(&self, text: &str, category: Category) -> String {
        match &self.backend {
            ModelBackend::Remote(llm) => self.generate_remote(llm.as_ref(), text, category).await,
            ModelBackend::Simulation => fallback_response(category).to_string(),
        }
    }

    async fn classify_remote(&self, llm: &L, text: &str) -> Result<ClassificationVerdict, AppError> {
        let attempts = self.settings.retry_attempts;
        let prompt = classification_prompt(text);
        let mut last_error = AppError::Internal("no classification attempt was made".to_string());

        for attempt in 1..=attempts {
            let request = CompletionRequest {
                system_prompt: CLASSIFICATION_SYSTEM_PROMPT.to_string(),
                user_prompt: prompt.clone(),
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
                timeout: self.settings.timeout(),
            };

            let outcome = match llm.complete(request).await {
                Ok(raw) => parse_verdict(&raw).map_err(AppError::from),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(verdict) => {
                    info!(attempt, category = %verdict.category, "Classification attempt succeeded");
                    return Ok(verdict);
                }
                Err(e) if !e.is_transient() => {
                    error!(attempt, "Classification aborted on non-retryable error: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    warn!(attempt, attempts, "Classification attempt failed: {}", e);
                    last_error = e;
                }
            }

            if attempt < attempts {
                sleep(self.settings.backoff_unit() * attempt).await;
            }
        }

        Err(AppError::RetriesExhausted {
            attempts,
            last_error: last_error.to_string(),
        })
    }

    async fn generate_remote(&self, llm: &L, text: &str, category: Category) -> String {
        let attempts = self.settings.retry_attempts;
        let prompt = response_prompt(text, category);

        for attempt in 1..=attempts {
            let request = CompletionRequest {
                system_prompt: RESPONSE_SYSTEM_PROMPT.to_string(),
                user_prompt: prompt.clone(),
                temperature: self.settings.response_temperature,
                max_tokens: self.settings.response_max_tokens,
                timeout: self.settings.timeout(),
            };

            let outcome = match llm.complete(request).await {
                Ok(reply) => {
                    let reply = reply.trim().to_string();
                    let chars = reply.chars().count();
                    if chars < MIN_RESPONSE_CHARS {
                        Err(AppError::ResponseTooShort(chars))
                    } else {
                        Ok(reply)
                    }
                }
                Err(e) => Err(e),
            };

            match outcome {
                Ok(reply) => {
                    info!(attempt, "Reply generated");
                    return reply;
                }
                Err(e) if !e.is_transient() => {
                    error!(attempt, "Reply generation aborted on non-retryable error: {}", e);
                    break;
                }
                Err(e) => warn!(attempt, attempts, "Reply generation attempt failed: {}", e),
            }

            if attempt < attempts {
                sleep(self.settings.backoff_unit() * attempt / 2).await;
            }
        }

        warn!(%category, "Reply generation exhausted, using canned reply");
        fallback_response(category).to_string()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "erro inesperado".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::Validating.to_string(), "validating");
        assert_eq!(PipelineStage::Error.to_string(), "error");
    }

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn Any + Send> = Box::new("static boom");
        assert_eq!(panic_message(boxed.as_ref()), "static boom");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(boxed.as_ref()), "owned boom");

        let boxed: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(boxed.as_ref()), "erro inesperado");
    }
}
