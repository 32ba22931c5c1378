//! HTTP completion backend.
//!
//! One client serves both supported wire shapes, selected by
//! [`BackendMode`]: the local-chat shape extracts generated text from
//! `message.content`, the hosted-generate shape from `output.text`. The
//! request body is identical in both modes.
//!
//! No retries anywhere: a failed round-trip surfaces as a [`BackendError`]
//! which the orchestration layer renders into a persisted advisory turn.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use marketeer_core::llm::backend::CompletionBackend;
use marketeer_types::config::{BackendConfig, BackendMode};
use marketeer_types::llm::{BackendError, Message};

/// Completion backend speaking a configurable HTTP shape.
///
/// # API Key Security
///
/// Does NOT derive Debug so the bearer key held in the `SecretString`
/// cannot leak through logging of the backend value.
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    mode: BackendMode,
    name: String,
    url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl HttpCompletionBackend {
    /// Build a backend from configuration.
    ///
    /// The request timeout is baked into the client: 60 s for local
    /// inference, 30 s for hosted APIs, unless overridden.
    pub fn from_config(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            mode: config.mode,
            name: config.mode.to_string(),
            url: config.url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.as_deref().map(SecretString::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Local-chat success shape: `{"message": {"content": "..."}}`.
#[derive(Deserialize)]
struct LocalChatResponse {
    message: LocalChatMessage,
}

#[derive(Deserialize)]
struct LocalChatMessage {
    content: String,
}

/// Hosted-generate success shape: `{"output": {"text": "..."}}`.
#[derive(Deserialize)]
struct HostedGenerateResponse {
    output: HostedGenerateOutput,
}

#[derive(Deserialize)]
struct HostedGenerateOutput {
    text: String,
}

/// Classify a reqwest transport failure.
///
/// Connect failures mean the backend is unreachable (local server not
/// running). Timeout expiry is classified as `Unexpected` — the request
/// reached the backend but did not complete in time, and no cancellation
/// protocol exists for the work already issued.
fn map_transport_error(e: reqwest::Error) -> BackendError {
    if e.is_connect() {
        BackendError::ConnectionUnavailable(e.to_string())
    } else if e.is_timeout() {
        BackendError::Unexpected(format!("request timed out: {e}"))
    } else {
        BackendError::Unexpected(e.to_string())
    }
}

impl CompletionBackend for HttpCompletionBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[Message]) -> Result<String, BackendError> {
        let body = CompletionBody {
            model: &self.model,
            messages,
            stream: false,
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        match self.mode {
            BackendMode::LocalChat => {
                let parsed: LocalChatResponse = response.json().await.map_err(|e| {
                    BackendError::Unexpected(format!("failed to parse response: {e}"))
                })?;
                Ok(parsed.message.content)
            }
            BackendMode::HostedGenerate => {
                let parsed: HostedGenerateResponse = response.json().await.map_err(|e| {
                    BackendError::Unexpected(format!("failed to parse response: {e}"))
                })?;
                Ok(parsed.output.text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketeer_types::llm::{MessageRole, CONNECTION_ADVISORY};

    fn local_backend(url: &str) -> HttpCompletionBackend {
        HttpCompletionBackend::from_config(&BackendConfig {
            mode: BackendMode::LocalChat,
            url: url.to_string(),
            model: "llama3.2".to_string(),
            api_key: None,
            timeout_secs: Some(5),
        })
    }

    #[test]
    fn test_from_config_exposes_mode_and_model() {
        let backend = local_backend("http://localhost:11434/api/chat");
        assert_eq!(backend.name(), "local_chat");
        assert_eq!(backend.model(), "llama3.2");
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![
            Message::new(MessageRole::System, "Be helpful"),
            Message::new(MessageRole::User, "Hello"),
        ];
        let body = CompletionBody {
            model: "llama3.2",
            messages: &messages,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hello");
    }

    #[test]
    fn test_local_chat_extraction_path() {
        let parsed: LocalChatResponse = serde_json::from_str(
            r#"{"model":"llama3.2","message":{"role":"assistant","content":"Hi!"},"done":true}"#,
        )
        .unwrap();
        assert_eq!(parsed.message.content, "Hi!");
    }

    #[test]
    fn test_hosted_generate_extraction_path() {
        let parsed: HostedGenerateResponse =
            serde_json::from_str(r#"{"id":"gen-1","output":{"text":"Sure."},"usage":{}}"#).unwrap();
        assert_eq!(parsed.output.text, "Sure.");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_connection_unavailable() {
        // Port 1 on localhost refuses connections immediately.
        let backend = local_backend("http://127.0.0.1:1/api/chat");
        let err = backend
            .complete(&[Message::new(MessageRole::User, "hi")])
            .await
            .unwrap_err();

        assert!(
            matches!(err, BackendError::ConnectionUnavailable(_)),
            "unexpected error: {err:?}"
        );
        assert!(err.user_message().starts_with(CONNECTION_ADVISORY));
    }
}
