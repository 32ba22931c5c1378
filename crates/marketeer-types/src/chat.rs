//! Chat and message types for Marketeer.
//!
//! A chat belongs to exactly one owner for its entire lifetime and carries a
//! domain kind that selects the system directive and welcome text. Messages
//! are append-only and ordered by creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

pub use crate::llm::MessageRole;

/// Domain kind of a chat, selecting its system directive and welcome message.
///
/// The six named kinds map to the SQL tag of the same name. Unrecognized tags
/// are a valid, supported state — they round-trip through [`ChatKind::Other`]
/// and fall back to the generic marketing-assistant directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChatKind {
    Analysis,
    Strategy,
    Content,
    Ads,
    Seo,
    Social,
    /// Any other tag, preserved verbatim.
    Other(String),
}

impl ChatKind {
    /// Parse a raw tag. Total: unknown tags become [`ChatKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "analysis" => ChatKind::Analysis,
            "strategy" => ChatKind::Strategy,
            "content" => ChatKind::Content,
            "ads" => ChatKind::Ads,
            "seo" => ChatKind::Seo,
            "social" => ChatKind::Social,
            other => ChatKind::Other(other.to_string()),
        }
    }

    /// The raw tag stored in SQLite and sent over the wire.
    pub fn as_tag(&self) -> &str {
        match self {
            ChatKind::Analysis => "analysis",
            ChatKind::Strategy => "strategy",
            ChatKind::Content => "content",
            ChatKind::Ads => "ads",
            ChatKind::Seo => "seo",
            ChatKind::Social => "social",
            ChatKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl From<String> for ChatKind {
    fn from(s: String) -> Self {
        ChatKind::from_tag(&s)
    }
}

impl From<ChatKind> for String {
    fn from(kind: ChatKind) -> Self {
        kind.as_tag().to_string()
    }
}

/// A chat owned by a single user.
///
/// `owner_id` never changes after creation; ownership is the sole
/// authorization boundary for every message operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub kind: ChatKind,
    pub created_at: DateTime<Utc>,
}

/// A single persisted turn within a chat.
///
/// Only `user` and `assistant` roles are ever stored; system entries are
/// synthesized at context-assembly time and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a new turn with a fresh time-sortable id.
    pub fn new(chat_id: Uuid, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            chat_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

impl From<&ChatMessage> for crate::llm::Message {
    fn from(msg: &ChatMessage) -> Self {
        crate::llm::Message {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_kind_roundtrip() {
        for kind in [
            ChatKind::Analysis,
            ChatKind::Strategy,
            ChatKind::Content,
            ChatKind::Ads,
            ChatKind::Seo,
            ChatKind::Social,
        ] {
            let tag = kind.to_string();
            assert_eq!(ChatKind::from_tag(&tag), kind);
        }
    }

    #[test]
    fn test_chat_kind_unknown_tag_is_preserved() {
        let kind = ChatKind::from_tag("billing");
        assert_eq!(kind, ChatKind::Other("billing".to_string()));
        assert_eq!(kind.as_tag(), "billing");
    }

    #[test]
    fn test_chat_kind_serde_as_plain_string() {
        let json = serde_json::to_string(&ChatKind::Seo).unwrap();
        assert_eq!(json, "\"seo\"");
        let parsed: ChatKind = serde_json::from_str("\"growth-hacking\"").unwrap();
        assert_eq!(parsed, ChatKind::Other("growth-hacking".to_string()));
    }

    #[test]
    fn test_chat_message_new_sets_id_and_timestamp() {
        let chat_id = Uuid::now_v7();
        let msg = ChatMessage::new(chat_id, MessageRole::User, "hi");
        assert_eq!(msg.chat_id, chat_id);
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn test_chat_message_converts_to_context_message() {
        let msg = ChatMessage::new(Uuid::now_v7(), MessageRole::Assistant, "hello there");
        let ctx: crate::llm::Message = (&msg).into();
        assert_eq!(ctx.role, MessageRole::Assistant);
        assert_eq!(ctx.content, "hello there");
    }
}
