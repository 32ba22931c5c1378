//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `marketeer-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, RFC 3339 datetime
//! mapping.

use marketeer_core::chat::repository::ChatRepository;
use marketeer_types::chat::{Chat, ChatKind, ChatMessage};
use marketeer_types::error::RepositoryError;
use marketeer_types::llm::MessageRole;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatRow {
    id: String,
    owner_id: String,
    name: String,
    kind: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;
        let owner_id = Uuid::parse_str(&self.owner_id)
            .map_err(|e| RepositoryError::Query(format!("invalid owner_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Chat {
            id,
            owner_id,
            name: self.name,
            kind: ChatKind::from_tag(&self.kind),
            created_at,
        })
    }
}

struct MessageRow {
    id: String,
    chat_id: String,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let chat_id = Uuid::parse_str(&self.chat_id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(ChatMessage {
            id,
            chat_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_chat(&self, chat: &Chat) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chats (id, owner_id, name, kind, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(chat.id.to_string())
        .bind(chat.owner_id.to_string())
        .bind(&chat.name)
        .bind(chat.kind.as_tag())
        .bind(format_datetime(&chat.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_chat(&self, chat_id: &Uuid) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE id = ?")
            .bind(chat_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row =
                    ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chat_row.into_chat()?))
            }
            None => Ok(None),
        }
    }

    async fn chat_owned_by(
        &self,
        chat_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE id = ? AND owner_id = ?")
            .bind(chat_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row =
                    ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chat_row.into_chat()?))
            }
            None => Ok(None),
        }
    }

    async fn list_chats(&self, owner_id: &Uuid) -> Result<Vec<Chat>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM chats WHERE owner_id = ? ORDER BY created_at DESC, id DESC")
                .bind(owner_id.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut chats = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row =
                ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            chats.push(chat_row.into_chat()?);
        }

        Ok(chats)
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (id, chat_id, role, content, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.chat_id.to_string())
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(&self, chat_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE chat_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(chat_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn clear_messages(&self, chat_id: &Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM messages WHERE chat_id = ?")
            .bind(chat_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn count_chats(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chats")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }

    async fn count_messages(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM messages")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn insert_user(pool: &DatabasePool) -> Uuid {
        let user_id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(format!("user-{user_id}"))
        .bind(format!("{user_id}@example.com"))
        .bind("hash")
        .bind(Utc::now().to_rfc3339())
        .execute(&pool.writer)
        .await
        .unwrap();
        user_id
    }

    fn make_chat(owner_id: Uuid, kind: ChatKind) -> Chat {
        Chat {
            id: Uuid::now_v7(),
            owner_id,
            name: "Test chat".to_string(),
            kind,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_chat() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;

        let chat = make_chat(owner, ChatKind::Seo);
        repo.create_chat(&chat).await.unwrap();

        let found = repo.get_chat(&chat.id).await.unwrap().unwrap();
        assert_eq!(found.id, chat.id);
        assert_eq!(found.owner_id, owner);
        assert_eq!(found.kind, ChatKind::Seo);
        assert_eq!(found.name, "Test chat");
    }

    #[tokio::test]
    async fn test_unknown_kind_roundtrips_verbatim() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;

        let chat = make_chat(owner, ChatKind::Other("growth".to_string()));
        repo.create_chat(&chat).await.unwrap();

        let found = repo.get_chat(&chat.id).await.unwrap().unwrap();
        assert_eq!(found.kind, ChatKind::Other("growth".to_string()));
    }

    #[tokio::test]
    async fn test_chat_owned_by_rejects_other_users() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;
        let stranger = insert_user(&pool).await;

        let chat = make_chat(owner, ChatKind::Analysis);
        repo.create_chat(&chat).await.unwrap();

        assert!(repo.chat_owned_by(&chat.id, &owner).await.unwrap().is_some());
        assert!(repo
            .chat_owned_by(&chat.id, &stranger)
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .chat_owned_by(&Uuid::now_v7(), &owner)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_chats_newest_first() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;

        let mut ids = Vec::new();
        for i in 0..3 {
            let mut chat = make_chat(owner, ChatKind::Content);
            chat.name = format!("chat {i}");
            chat.created_at = Utc::now() + chrono::Duration::seconds(i);
            repo.create_chat(&chat).await.unwrap();
            ids.push(chat.id);
        }

        let chats = repo.list_chats(&owner).await.unwrap();
        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0].id, ids[2], "most recent chat first");
        assert_eq!(chats[2].id, ids[0]);
    }

    #[tokio::test]
    async fn test_messages_roundtrip_in_insertion_order() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;
        let chat = make_chat(owner, ChatKind::Ads);
        repo.create_chat(&chat).await.unwrap();

        let first = ChatMessage::new(chat.id, MessageRole::User, "Hello");
        let second = ChatMessage::new(chat.id, MessageRole::Assistant, "Hi there!");
        repo.save_message(&first).await.unwrap();
        repo.save_message(&second).await.unwrap();

        let messages = repo.get_messages(&chat.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "Hi there!");
        assert!(messages[1].created_at >= messages[0].created_at);
    }

    #[tokio::test]
    async fn test_content_preserved_byte_for_byte() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;
        let chat = make_chat(owner, ChatKind::Social);
        repo.create_chat(&chat).await.unwrap();

        let content = "line1\nline2\t\"quoted\" — ünïcødé 🚀";
        let msg = ChatMessage::new(chat.id, MessageRole::User, content);
        repo.save_message(&msg).await.unwrap();

        let messages = repo.get_messages(&chat.id).await.unwrap();
        assert_eq!(messages.last().unwrap().content, content);
    }

    #[tokio::test]
    async fn test_clear_messages_keeps_chat() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;
        let chat = make_chat(owner, ChatKind::Strategy);
        repo.create_chat(&chat).await.unwrap();

        repo.save_message(&ChatMessage::new(chat.id, MessageRole::User, "a"))
            .await
            .unwrap();
        repo.save_message(&ChatMessage::new(chat.id, MessageRole::Assistant, "b"))
            .await
            .unwrap();

        repo.clear_messages(&chat.id).await.unwrap();

        assert!(repo.get_messages(&chat.id).await.unwrap().is_empty());
        assert!(repo.get_chat(&chat.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_counts() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let owner = insert_user(&pool).await;

        assert_eq!(repo.count_chats().await.unwrap(), 0);
        assert_eq!(repo.count_messages().await.unwrap(), 0);

        let chat = make_chat(owner, ChatKind::Analysis);
        repo.create_chat(&chat).await.unwrap();
        repo.save_message(&ChatMessage::new(chat.id, MessageRole::User, "x"))
            .await
            .unwrap();

        assert_eq!(repo.count_chats().await.unwrap(), 1);
        assert_eq!(repo.count_messages().await.unwrap(), 1);
    }
}
