//! Chat service orchestrating chats, context assembly, and backend round-trips.
//!
//! ChatService owns the full message flow: ownership check, user-turn
//! persistence, context assembly, backend call, assistant-turn persistence.
//! Backend failures are converted to advisory text and persisted like any
//! other assistant turn — the transcript stays complete and replayable.

use std::time::Instant;

use chrono::Utc;
use marketeer_types::chat::{Chat, ChatKind, ChatMessage, MessageRole};
use marketeer_types::error::RepositoryError;
use marketeer_types::llm::Message;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::context::assemble;
use crate::llm::CompletionBackend;
use crate::prompt::welcome_for;

/// The two turns produced by one posted message.
#[derive(Debug, Clone)]
pub struct MessageExchange {
    pub user_message: ChatMessage,
    pub bot_response: ChatMessage,
}

/// Orchestrates chat lifecycle and message round-trips.
///
/// Generic over [`ChatRepository`] and [`CompletionBackend`] so core never
/// depends on marketeer-infra.
///
/// Concurrent posts to the same chat are not serialized here: the
/// user-turn / backend-call / assistant-turn triple is deliberately not
/// transactional, so two racing writers may interleave their turns. The
/// storage layer serializes individual writes; nothing more is guaranteed.
pub struct ChatService<R: ChatRepository, B: CompletionBackend> {
    repo: R,
    backend: B,
}

impl<R: ChatRepository, B: CompletionBackend> ChatService<R, B> {
    pub fn new(repo: R, backend: B) -> Self {
        Self { repo, backend }
    }

    /// Access the chat repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Access the completion backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create a chat and persist its fixed welcome turn.
    pub async fn create_chat(
        &self,
        owner_id: Uuid,
        name: String,
        kind: ChatKind,
    ) -> Result<Chat, RepositoryError> {
        let chat = Chat {
            id: Uuid::now_v7(),
            owner_id,
            name,
            kind,
            created_at: Utc::now(),
        };
        self.repo.create_chat(&chat).await?;

        let welcome = ChatMessage::new(chat.id, MessageRole::Assistant, welcome_for(&chat.kind));
        self.repo.save_message(&welcome).await?;

        info!(chat_id = %chat.id, kind = %chat.kind, "chat created");
        Ok(chat)
    }

    /// List a user's chats, newest first.
    pub async fn list_chats(&self, owner_id: &Uuid) -> Result<Vec<Chat>, RepositoryError> {
        self.repo.list_chats(owner_id).await
    }

    /// Get a chat if the caller owns it.
    pub async fn get_chat(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Chat>, RepositoryError> {
        self.repo.chat_owned_by(chat_id, user_id).await
    }

    /// Post a message and run the completion round-trip.
    ///
    /// Returns `None` when the chat does not exist or is not owned by
    /// `user_id` — indistinguishable by design.
    ///
    /// The history snapshot is taken before the user turn is appended, so
    /// the new message appears exactly once in the outbound context.
    pub async fn post_message(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
        text: &str,
    ) -> Result<Option<MessageExchange>, RepositoryError> {
        let Some(chat) = self.repo.chat_owned_by(chat_id, user_id).await? else {
            return Ok(None);
        };

        let history = self.repo.get_messages(chat_id).await?;

        let user_message = ChatMessage::new(chat.id, MessageRole::User, text);
        self.repo.save_message(&user_message).await?;

        let context_history: Vec<Message> = history.iter().map(Into::into).collect();
        let context = assemble(&chat.kind, &context_history, text);

        let started = Instant::now();
        let reply = match self.backend.complete(&context).await {
            Ok(generated) => generated,
            Err(err) => {
                warn!(
                    chat_id = %chat.id,
                    backend = self.backend.name(),
                    error = %err,
                    "backend round-trip failed, persisting advisory turn"
                );
                err.user_message()
            }
        };
        info!(
            chat_id = %chat.id,
            backend = self.backend.name(),
            context_len = context.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "completion round-trip finished"
        );

        let bot_response = ChatMessage::new(chat.id, MessageRole::Assistant, reply);
        self.repo.save_message(&bot_response).await?;

        Ok(Some(MessageExchange {
            user_message,
            bot_response,
        }))
    }

    /// Full ordered history, or `None` if not owned.
    pub async fn history(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Vec<ChatMessage>>, RepositoryError> {
        if self.repo.chat_owned_by(chat_id, user_id).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.repo.get_messages(chat_id).await?))
    }

    /// Delete all messages, keeping the chat. `None` if not owned.
    pub async fn clear(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<()>, RepositoryError> {
        if self.repo.chat_owned_by(chat_id, user_id).await?.is_none() {
            return Ok(None);
        }
        self.repo.clear_messages(chat_id).await?;
        info!(chat_id = %chat_id, "chat history cleared");
        Ok(Some(()))
    }
}
