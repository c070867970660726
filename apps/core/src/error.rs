use std::io;
use thiserror::Error;

/// Errors raised while turning raw model output into a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The extracted payload is not valid JSON.
    #[error("malformed JSON in model output: {0}")]
    MalformedJson(String),

    /// The payload is JSON but misses fields or carries out-of-range values.
    #[error("invalid verdict shape: {0}")]
    InvalidShape(String),
}

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// The email text is shorter than the configured minimum (after trimming).
    #[error("O texto do email deve ter pelo menos {min} caracteres")]
    EmptyInput { min: usize },

    /// The email text exceeds the configured maximum.
    #[error("O texto excede o limite de {max} caracteres (recebido: {actual})")]
    TooLong { max: usize, actual: usize },

    /// A transient failure reported by the remote model (HTTP error, bad status, empty body).
    #[error("Remote model error: {0}")]
    RemoteModel(String),

    /// A remote call that did not complete within its deadline.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// The model answered, but not with a usable verdict.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The generated reply was shorter than the accepted minimum.
    #[error("Generated response too short ({0} characters)")]
    ResponseTooShort(usize),

    /// Every attempt of a bounded retry loop failed.
    #[error("Falha após {attempts} tentativas: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether a retry loop may try again after this error.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::RemoteModel(_)
                | AppError::Timeout(_)
                | AppError::Parse(_)
                | AppError::ResponseTooShort(_)
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::EmptyInput { min } => AppError::EmptyInput { min: *min },
            AppError::TooLong { max, actual } => AppError::TooLong {
                max: *max,
                actual: *actual,
            },
            AppError::RemoteModel(s) => AppError::RemoteModel(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
            AppError::Parse(e) => AppError::Parse(e.clone()),
            AppError::ResponseTooShort(n) => AppError::ResponseTooShort(*n),
            AppError::RetriesExhausted {
                attempts,
                last_error,
            } => AppError::RetriesExhausted {
                attempts: *attempts,
                last_error: last_error.clone(),
            },
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Remote call exceeded its deadline: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Invalid settings: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP timeout: {}", err))
        } else {
            AppError::RemoteModel(format!("HTTP error: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(AppError::RemoteModel("503".into()).is_transient());
        assert!(AppError::Timeout("30s".into()).is_transient());
        assert!(AppError::Parse(ParseError::MalformedJson("eof".into())).is_transient());
        assert!(AppError::ResponseTooShort(3).is_transient());

        assert!(!AppError::EmptyInput { min: 10 }.is_transient());
        assert!(!AppError::TooLong { max: 10, actual: 11 }.is_transient());
        assert!(!AppError::Internal("bug".into()).is_transient());
    }

    #[test]
    fn test_retries_exhausted_message_carries_last_error() {
        let err = AppError::RetriesExhausted {
            attempts: 3,
            last_error: "Remote model error: 500".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("3 tentativas"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_clone_preserves_io_kind() {
        let err = AppError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        match err.clone() {
            AppError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected clone: {:?}", other),
        }
    }
}
