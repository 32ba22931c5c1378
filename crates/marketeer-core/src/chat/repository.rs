//! ChatRepository trait definition.
//!
//! Persistence operations for chats and their messages. Implementations live
//! in marketeer-infra (e.g., `SqliteChatRepository`). Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).
//!
//! This is a trusted-caller data layer: apart from `chat_owned_by`, no
//! operation re-checks ownership. The orchestration layer gates every
//! message operation through `chat_owned_by` first.

use marketeer_types::chat::{Chat, ChatMessage};
use marketeer_types::error::RepositoryError;
use uuid::Uuid;

pub trait ChatRepository: Send + Sync {
    /// Persist a new chat.
    fn create_chat(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a chat by id with no ownership scope. Trusted callers only.
    fn get_chat(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// Get a chat only if `user_id` owns it.
    ///
    /// This is the sole authorization check in the system. `None` covers
    /// both "does not exist" and "owned by someone else" — callers must not
    /// distinguish the two.
    fn chat_owned_by(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// List a user's chats, most recently created first.
    fn list_chats(
        &self,
        owner_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Append one message. Insertion order defines retrieval order.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All messages of a chat in ascending creation order.
    fn get_messages(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Delete every message of a chat; the chat record survives.
    fn clear_messages(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Total chats across all users.
    fn count_chats(&self)
        -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Total messages across all chats.
    fn count_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
