//! Completion client for the DeepSeek chat-completion API.
//!
//! One request, one response: no retries, no streaming, and no timeout
//! beyond the transport defaults.

use crate::error::CompletionError;
use crate::message::{ChatMessage, CompletionRequest};
use async_trait::async_trait;
use copywell_core::ApiKey;
use rootcause::Report;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Anything that can turn a completion request into text.
///
/// The handlers depend on this trait rather than on [`DeepSeekClient`]
/// directly.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends the request and returns the trimmed, non-empty completion.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Provider`] on a non-success status,
    /// [`CompletionError::EmptyCompletion`] when the reply has no text,
    /// [`CompletionError::Transport`] when no reply was received, and
    /// [`CompletionError::InvalidRequest`] when the request is rejected
    /// before sending.
    async fn complete(
        &self,
        credential: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<String, Report<CompletionError>>;
}

/// HTTP client for an OpenAI-compatible `/v1/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    http: reqwest::Client,
    base_url: String,
    default_model: String,
}

impl DeepSeekClient {
    /// Public DeepSeek API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.deepseek.com";
    /// Standard DeepSeek chat model.
    pub const DEFAULT_MODEL: &'static str = "deepseek-chat";

    /// Creates a client for the given base URL and default model.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Result<Self, Report<CompletionError>> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| CompletionError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self::with_http(http, base_url, default_model))
    }

    /// Creates a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: default_model.into(),
        }
    }

    /// Returns the chat-completion endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    #[instrument(
        skip_all,
        fields(
            model = request.model.as_deref().unwrap_or(&self.default_model),
            messages = request.messages.len(),
        )
    )]
    async fn send(
        &self,
        credential: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<String, Report<CompletionError>> {
        let body = WireRequest::from_request(request, &self.default_model)?;
        let url = self.endpoint();

        debug!(
            endpoint = %url,
            temperature = body.temperature,
            max_tokens = body.max_tokens,
            "Sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, credential.bearer())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport {
                reason: e.to_string(),
            })?;
        let parsed = serde_json::from_slice::<WireResponse>(&bytes);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|body| body.error)
                .and_then(|error| error.message)
                .or_else(|| {
                    status
                        .canonical_reason()
                        .filter(|reason| !reason.is_empty())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Unknown error".to_string());

            debug!(status = %status, message = %message, "Provider returned an error");
            return Err(CompletionError::Provider { message }.into());
        }

        let parsed = parsed.map_err(|e| CompletionError::Provider {
            message: format!("malformed response body: {e}"),
        })?;

        let text = parsed
            .first_content()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::EmptyCompletion)?;

        debug!(chars = text.chars().count(), "Received completion");
        Ok(text.to_string())
    }
}

#[async_trait]
impl CompletionBackend for DeepSeekClient {
    async fn complete(
        &self,
        credential: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<String, Report<CompletionError>> {
        self.send(credential, request).await
    }
}

/// Request body as sent on the wire, with defaults applied.
#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

impl<'a> WireRequest<'a> {
    fn from_request(
        request: &'a CompletionRequest,
        default_model: &'a str,
    ) -> Result<Self, CompletionError> {
        if request.messages.is_empty() {
            return Err(CompletionError::InvalidRequest {
                reason: "messages must not be empty".to_string(),
            });
        }

        let temperature = request
            .temperature
            .unwrap_or(CompletionRequest::DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(CompletionError::InvalidRequest {
                reason: format!("temperature {temperature} is outside [0, 2]"),
            });
        }

        let max_tokens = request
            .max_tokens
            .unwrap_or(CompletionRequest::DEFAULT_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(CompletionError::InvalidRequest {
                reason: "max_tokens must be positive".to_string(),
            });
        }

        Ok(Self {
            model: request.model.as_deref().unwrap_or(default_model),
            messages: &request.messages,
            temperature,
            max_tokens,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Option<Vec<WireChoice>>,
    #[serde(default)]
    error: Option<WireError>,
}

impl WireResponse {
    fn first_content(&self) -> Option<&str> {
        self.choices
            .as_deref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> ApiKey {
        ApiKey::new("sk-test").expect("non-empty key")
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(vec![
            ChatMessage::system("You write captions."),
            ChatMessage::user("Sunny day at the beach"),
        ])
    }

    fn completion(content: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    async fn client_for(server: &MockServer) -> DeepSeekClient {
        DeepSeekClient::new(server.uri(), DeepSeekClient::DEFAULT_MODEL).expect("client")
    }

    #[tokio::test]
    async fn returns_trimmed_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion(json!("  Hello there \n"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect("completion");
        assert_eq!(text, "Hello there");
    }

    #[tokio::test]
    async fn applies_default_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "max_tokens": 2048,
                "messages": [
                    { "role": "system", "content": "You write captions." },
                    { "role": "user", "content": "Sunny day at the beach" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("ok"))))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect("completion");
        assert_eq!(text, "ok");

        let received = server.received_requests().await.expect("recorded");
        let body: serde_json::Value = received[0].body_json().expect("json body");
        let temperature = body["temperature"].as_f64().expect("temperature");
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn explicit_parameters_override_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "model": "deepseek-reasoner",
                "max_tokens": 512
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("ok"))))
            .expect(1)
            .mount(&server)
            .await;

        let request = request()
            .with_model("deepseek-reasoner")
            .with_temperature(0.75)
            .with_max_tokens(512);
        client_for(&server)
            .await
            .complete(&key(), &request)
            .await
            .expect("completion");
    }

    #[tokio::test]
    async fn provider_error_message_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": { "message": "bad request" } })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect_err("should fail");
        assert_eq!(
            err.current_context(),
            &CompletionError::Provider {
                message: "bad request".to_string()
            }
        );
        assert_eq!(
            err.current_context().to_string(),
            "DeepSeek API error: bad request"
        );
    }

    #[tokio::test]
    async fn provider_error_falls_back_to_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect_err("should fail");
        assert_eq!(
            err.current_context(),
            &CompletionError::Provider {
                message: "Unauthorized".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect_err("should fail");
        match err.current_context() {
            CompletionError::Provider { message } => {
                assert!(message.starts_with("malformed response body: "), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let client =
            DeepSeekClient::new(format!("http://{addr}"), DeepSeekClient::DEFAULT_MODEL)
                .expect("client");
        let err = client
            .complete(&key(), &request())
            .await
            .expect_err("should fail");
        assert!(matches!(
            err.current_context(),
            CompletionError::Transport { .. }
        ));
        assert!(
            err.current_context()
                .to_string()
                .starts_with("DeepSeek API request failed: ")
        );
    }

    #[tokio::test]
    async fn empty_choices_is_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect_err("should fail");
        assert_eq!(err.current_context(), &CompletionError::EmptyCompletion);
    }

    #[tokio::test]
    async fn whitespace_content_is_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(" \n\t "))))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect_err("should fail");
        assert_eq!(err.current_context(), &CompletionError::EmptyCompletion);
    }

    #[tokio::test]
    async fn null_content_is_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(null))))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .complete(&key(), &request())
            .await
            .expect_err("should fail");
        assert_eq!(err.current_context(), &CompletionError::EmptyCompletion);
    }

    #[tokio::test]
    async fn empty_message_list_is_rejected_without_io() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("ok"))))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .complete(&key(), &CompletionRequest::new(Vec::new()))
            .await
            .expect_err("should fail");
        assert!(matches!(
            err.current_context(),
            CompletionError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = DeepSeekClient::with_http(
            reqwest::Client::new(),
            "https://api.deepseek.com/",
            DeepSeekClient::DEFAULT_MODEL,
        );
        assert_eq!(
            client.endpoint(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let request = request().with_temperature(2.5);
        let err = WireRequest::from_request(&request, "deepseek-chat").expect_err("reject");
        assert!(matches!(err, CompletionError::InvalidRequest { .. }));
    }
}
