//! Backend request/response types for Marketeer.
//!
//! Models the message shapes sent to the completion backend and the error
//! taxonomy for failed round-trips. Every backend failure converts into a
//! user-displayable string via [`BackendError::user_message`] so the chat
//! transcript stays complete even when the backend is down.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a model conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in the outbound model context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Fixed advisory shown when the backend cannot be reached at all.
///
/// Tests and the orchestrator both key off this exact prefix.
pub const CONNECTION_ADVISORY: &str =
    "Error: could not reach the model backend. Make sure the inference server is running.";

/// Errors from a backend completion round-trip.
///
/// The taxonomy is deliberately small: unreachable, rejected with an HTTP
/// status, or anything else. No variant is retried, and none escapes the
/// orchestration layer as a boundary error.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    ConnectionUnavailable(String),

    #[error("backend rejected request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("unexpected backend fault: {0}")]
    Unexpected(String),
}

impl BackendError {
    /// Render this failure as the assistant-turn text persisted in the chat.
    ///
    /// `ConnectionUnavailable` always yields the fixed advisory, regardless
    /// of the underlying transport detail.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::ConnectionUnavailable(_) => CONNECTION_ADVISORY.to_string(),
            BackendError::Rejected { status, body } => {
                format!("Model backend error: {status} - {body}")
            }
            BackendError::Unexpected(detail) => {
                format!("Error talking to the model backend: {detail}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_message_serializes_with_lowercase_role() {
        let msg = Message::new(MessageRole::User, "hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);
    }

    #[test]
    fn test_connection_error_uses_fixed_advisory() {
        let a = BackendError::ConnectionUnavailable("tcp connect refused".to_string());
        let b = BackendError::ConnectionUnavailable("dns lookup failed".to_string());
        assert_eq!(a.user_message(), CONNECTION_ADVISORY);
        assert_eq!(a.user_message(), b.user_message());
    }

    #[test]
    fn test_rejected_embeds_status_and_body() {
        let err = BackendError::Rejected {
            status: 503,
            body: "model is loading".to_string(),
        };
        let msg = err.user_message();
        assert!(msg.contains("503"));
        assert!(msg.contains("model is loading"));
    }

    #[test]
    fn test_unexpected_embeds_detail() {
        let err = BackendError::Unexpected("missing field `message`".to_string());
        assert!(err.user_message().contains("missing field `message`"));
    }
}
