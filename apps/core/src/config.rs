//! Process-wide settings.
//!
//! Resolved once at startup from the environment (and an optional `.env`
//! file), validated, then shared read-only behind an `Arc`.

use crate::error::AppError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};
use validator::Validate;

const DEFAULT_APP_NAME: &str = "Email Classifier API";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Whether a remote model can be called, decided once from the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelAvailability {
    /// A credential is configured; classification goes through the remote model.
    Remote,
    /// No credential; the keyword heuristic answers every request.
    Simulation,
}

#[derive(Debug, Clone, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub app_name: String,
    /// Bearer credential for the remote model. `None` switches the engine to simulation.
    pub api_key: Option<String>,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(url)]
    pub api_base: String,
    /// Sampling temperature for classification calls.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    #[validate(range(min = 1, max = 8192))]
    pub max_tokens: u32,
    /// Sampling temperature for reply generation.
    #[validate(range(min = 0.0, max = 2.0))]
    pub response_temperature: f32,
    #[validate(range(min = 1, max = 8192))]
    pub response_max_tokens: u32,
    /// Per-call deadline, in seconds.
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,
    #[validate(range(min = 1, max = 10))]
    pub retry_attempts: u32,
    /// One backoff time unit, in milliseconds.
    pub retry_backoff_ms: u64,
    #[validate(range(min = 1))]
    pub min_text_length: usize,
    #[validate(range(min = 1))]
    pub max_text_length: usize,
    #[validate(range(min = 1, max = 100))]
    pub max_file_size_mb: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: 0.3,
            max_tokens: 500,
            response_temperature: 0.5,
            response_max_tokens: 300,
            timeout_secs: 30,
            retry_attempts: 3,
            retry_backoff_ms: 1000,
            min_text_length: 10,
            max_text_length: 10_000,
            max_file_size_mb: 5,
        }
    }
}

impl Settings {
    /// Loads settings from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded environment overrides from .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup("GROQ_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let settings = Self {
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            api_key,
            model: lookup("GROQ_MODEL").unwrap_or(defaults.model),
            api_base: lookup("GROQ_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            temperature: parse_or(&lookup, "AI_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_or(&lookup, "AI_MAX_TOKENS", defaults.max_tokens)?,
            response_temperature: parse_or(
                &lookup,
                "AI_RESPONSE_TEMPERATURE",
                defaults.response_temperature,
            )?,
            response_max_tokens: parse_or(
                &lookup,
                "AI_RESPONSE_MAX_TOKENS",
                defaults.response_max_tokens,
            )?,
            timeout_secs: parse_or(&lookup, "AI_TIMEOUT", defaults.timeout_secs)?,
            retry_attempts: parse_or(&lookup, "RETRY_ATTEMPTS", defaults.retry_attempts)?,
            retry_backoff_ms: parse_or(&lookup, "RETRY_BACKOFF_MS", defaults.retry_backoff_ms)?,
            min_text_length: parse_or(&lookup, "MIN_TEXT_LENGTH", defaults.min_text_length)?,
            max_text_length: parse_or(&lookup, "MAX_TEXT_LENGTH", defaults.max_text_length)?,
            max_file_size_mb: parse_or(&lookup, "MAX_FILE_SIZE_MB", defaults.max_file_size_mb)?,
        };

        settings.validate()?;
        url::Url::parse(&settings.api_base)?;

        if settings.min_text_length > settings.max_text_length {
            return Err(AppError::Config(format!(
                "MIN_TEXT_LENGTH ({}) exceeds MAX_TEXT_LENGTH ({})",
                settings.min_text_length, settings.max_text_length
            )));
        }

        if settings.api_key.is_none() {
            warn!("GROQ_API_KEY not configured; classification will run in simulation mode");
        }

        Ok(settings)
    }

    pub fn model_availability(&self) -> ModelAvailability {
        if self.api_key.is_some() {
            ModelAvailability::Remote
        } else {
            ModelAvailability::Simulation
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} has an invalid value '{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}
