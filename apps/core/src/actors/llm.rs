use crate::actors::messages::{AppError, CompletionRequest, LlmMessage};
use crate::actors::traits::LlmActor;
use crate::config::Settings;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

// --- Constants ---
const CHANNEL_CAPACITY: usize = 32;
/// Extra time the handle waits past the per-attempt deadline before giving up on the actor itself.
const RESPONDER_GRACE: Duration = Duration::from_secs(5);
const ERROR_BODY_PREVIEW: usize = 200;

/// A handle to the remote model actor.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
}

impl LlmActorHandle {
    /// Creates a new actor for the configured OpenAI-compatible endpoint and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task, so it must be
    /// called from within a runtime.
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let api = ChatCompletionsApi::from_settings(settings)?;
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let actor = LlmActorRunner::new(receiver, api);
        tokio::spawn(async move { actor.run().await });
        Ok(Self { sender })
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let deadline = request.timeout + RESPONDER_GRACE;
        let (send, recv) = oneshot::channel();
        let msg = LlmMessage::Complete {
            request,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Internal(format!("LLM actor unavailable: {}", e)))?;
        timeout(deadline, recv)
            .await?
            .map_err(|e| AppError::Internal(format!("LLM actor dropped the request: {}", e)))?
    }
}

/// Connection details for a `/chat/completions` endpoint.
#[derive(Clone)]
struct ChatCompletionsApi {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsApi {
    fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let api_key = settings.api_key.clone().ok_or_else(|| {
            AppError::Config("GROQ_API_KEY is required to reach the remote model".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            endpoint: format!("{}/chat/completions", settings.api_base),
            api_key,
            model: settings.model.clone(),
        })
    }

    #[instrument(skip_all, fields(model = %self.model, max_tokens = request.max_tokens))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        debug!(
            prompt_chars = request.user_prompt.chars().count(),
            "Sending chat completion"
        );

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt }
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens
        });

        // One deadline covers the whole exchange: connect, headers and body.
        let exchange = async {
            let res = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .await?;
            let status = res.status();

            if !status.is_success() {
                let body = res.text().await.unwrap_or_default();
                let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
                warn!(%status, "Completion request rejected");
                return Err(AppError::RemoteModel(format!(
                    "Completion request failed with status {}: {}",
                    status, preview
                )));
            }

            res.json::<serde_json::Value>()
                .await
                .map_err(|e| AppError::RemoteModel(format!("Unreadable completion body: {}", e)))
        };

        let json = timeout(request.timeout, exchange).await??;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::RemoteModel("Completion response has no message content".to_string())
            })?;

        debug!(response_chars = content.chars().count(), "Completion received");
        Ok(content.to_string())
    }
}

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    api: ChatCompletionsApi,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, api: ChatCompletionsApi) -> Self {
        Self { receiver, api }
    }

    async fn run(mut self) {
        info!(endpoint = %self.api.endpoint, "LlmActor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }

        info!("LlmActor stopped");
    }

    // Each call runs in its own task so one slow completion never queues the others.
    fn handle_message(&self, msg: LlmMessage) {
        match msg {
            LlmMessage::Complete { request, responder } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.complete(request).await;
                    if let Err(e) = &result {
                        error!("Completion failed: {}", e);
                    }
                    let _ = responder.send(result);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::time::sleep;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_settings(server_url: String) -> Settings {
        Settings {
            api_key: Some("gsk_test".to_string()),
            api_base: server_url,
            ..Settings::default()
        }
    }

    fn request(timeout: Duration) -> CompletionRequest {
        CompletionRequest {
            system_prompt: "Você classifica emails".to_string(),
            user_prompt: "Hello".to_string(),
            temperature: 0.5,
            max_tokens: 300,
            timeout,
        }
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_complete_success() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(&test_settings(mock_server.uri())).unwrap();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("gsk_test"))
            .and(body_partial_json(json!({
                "model": "llama-3.1-8b-instant",
                "max_tokens": 300,
                "messages": [
                    { "role": "system", "content": "Você classifica emails" },
                    { "role": "user", "content": "Hello" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  Olá!  ")))
            .expect(1)
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle.complete(request(Duration::from_secs(5))).await;

        // 3. Assert
        assert_eq!(result.unwrap(), "Olá!");
    }

    #[tokio::test]
    async fn test_complete_server_error() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(&test_settings(mock_server.uri())).unwrap();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle.complete(request(Duration::from_secs(5))).await;

        // 3. Assert
        match result {
            Err(AppError::RemoteModel(msg)) => {
                assert!(msg.contains("status 500"));
                assert!(msg.contains("Internal Server Error"));
            }
            other => panic!("Expected AppError::RemoteModel, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_missing_content() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(&test_settings(mock_server.uri())).unwrap();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle.complete(request(Duration::from_secs(5))).await;

        // 3. Assert
        assert!(matches!(result, Err(AppError::RemoteModel(_))));
        assert!(result.unwrap_err().is_transient());
    }

    #[tokio::test]
    async fn test_complete_times_out() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(&test_settings(mock_server.uri())).unwrap();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("tarde demais"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle.complete(request(Duration::from_millis(50))).await;

        // 3. Assert
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_deadline_covers_headers_and_body() {
        // 1. Arrange: headers arrive at 0.8x the deadline, the body at 1.6x
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;

            let body = completion_body("resposta tardia").to_string();
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
                body.len()
            );
            sleep(Duration::from_millis(400)).await;
            let _ = socket.write_all(head.as_bytes()).await;
            sleep(Duration::from_millis(400)).await;
            let _ = socket.write_all(body.as_bytes()).await;
        });
        let handle = LlmActorHandle::new(&test_settings(format!("http://{}", addr))).unwrap();

        // 2. Act
        let started = Instant::now();
        let result = handle.complete(request(Duration::from_millis(500))).await;
        let elapsed = started.elapsed();

        // 3. Assert
        assert!(matches!(result, Err(AppError::Timeout(_))), "got {:?}", result);
        assert!(elapsed < Duration::from_millis(750), "attempt ran for {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_handle_requires_api_key() {
        let settings = Settings::default();
        assert!(matches!(
            LlmActorHandle::new(&settings),
            Err(AppError::Config(_))
        ));
    }
}
