//! Integration Tests
//!
//! End-to-end runs of the engine against a mocked OpenAI-compatible server,
//! going through the real actor, HTTP client and JSON handling.

use crate::config::{ModelAvailability, Settings};
use crate::engine::ClassificationEngine;
use crate::models::Category;
use crate::text_extract::extract_text_from_path;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Fixtures
// ============================================================================

fn settings_for(server: &MockServer) -> Arc<Settings> {
    Arc::new(Settings {
        api_key: Some("gsk_integration".to_string()),
        api_base: server.uri(),
        retry_backoff_ms: 5,
        timeout_secs: 2,
        ..Settings::default()
    })
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

/// Mounts one mock for classification calls and one for reply calls.
///
/// The system prompts differ, so a distinctive phrase of each routes the request.
async fn mount_model(server: &MockServer, verdict: ResponseTemplate, reply: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("classifica"))
        .respond_with(verdict)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("gerar respostas profissionais"))
        .respond_with(reply)
        .mount(server)
        .await;
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_pipeline_over_http() {
        // 1. Arrange
        let server = MockServer::start().await;
        mount_model(
            &server,
            completion(
                "```json\n{\"categoria\":\"PRODUTIVO\",\"confianca\":0.95,\"justificativa\":\"Solicitação de status\"}\n```",
            ),
            completion("Prezado(a),\n\nRecebemos sua solicitação e retornaremos em até 2 dias úteis.\n\nAtenciosamente,\nEquipe de Atendimento"),
        )
        .await;
        let engine = ClassificationEngine::from_settings(settings_for(&server)).unwrap();
        assert_eq!(engine.availability(), ModelAvailability::Remote);

        // 2. Act
        let result = engine
            .classify("Prezados, gostaria de solicitar o status da requisição #12345.")
            .await;

        // 3. Assert
        assert!(result.success, "unexpected failure: {:?}", result.error);
        assert_eq!(result.classification, Some(Category::Productive));
        assert_eq!(result.confidence, Some(0.95));
        assert!(result
            .suggested_response
            .unwrap()
            .contains("2 dias úteis"));
    }

    #[tokio::test]
    async fn test_server_errors_exhaust_retries() {
        // 1. Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(3)
            .mount(&server)
            .await;
        let engine = ClassificationEngine::from_settings(settings_for(&server)).unwrap();

        // 2. Act
        let result = engine
            .classify("O sistema está apresentando erro ao processar pagamentos.")
            .await;

        // 3. Assert
        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("503"), "error was: {}", error);
        assert!(result.processing_time_ms.is_some());
    }

    #[tokio::test]
    async fn test_slow_reply_falls_back_to_canned_response() {
        // 1. Arrange: the reply endpoint never answers within the 1s deadline
        let server = MockServer::start().await;
        mount_model(
            &server,
            completion(r#"{"categoria":"improdutivo","confianca":0.88,"justificativa":"Agradecimento simples"}"#),
            completion("Olá! Ficamos felizes em poder ajudar.").set_delay(Duration::from_secs(3)),
        )
        .await;
        let settings = Arc::new(Settings {
            timeout_secs: 1,
            retry_attempts: 2,
            ..(*settings_for(&server)).clone()
        });
        let engine = ClassificationEngine::from_settings(settings).unwrap();

        // 2. Act
        let result = engine.classify("Obrigado pela ajuda de ontem!").await;

        // 3. Assert
        assert!(result.success);
        assert_eq!(result.classification, Some(Category::Unproductive));
        assert!(result
            .suggested_response
            .unwrap()
            .contains("Agradecemos pela sua mensagem!"));
    }
}

// ============================================================================
// File Input
// ============================================================================

#[cfg(test)]
mod file_input_tests {
    use super::*;

    #[tokio::test]
    async fn test_txt_file_through_simulation() {
        let mut file: NamedTempFile = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Feliz aniversário! Parabéns pelo seu dia.\n--\nEquipe Comercial").unwrap();

        let settings = Arc::new(Settings::default());
        let text = extract_text_from_path(file.path(), settings.max_file_size_bytes()).unwrap();
        let engine = ClassificationEngine::from_settings(settings).unwrap();

        let result = engine.classify(&text).await;

        assert!(result.success);
        assert_eq!(result.classification, Some(Category::Unproductive));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_text_from_path(&dir.path().join("nope.txt"), 1024);
        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
    }
}
