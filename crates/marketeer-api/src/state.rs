//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the REST API. Services are generic over repository/backend/hasher traits;
//! AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use marketeer_core::chat::service::ChatService;
use marketeer_core::user::service::AuthService;
use marketeer_infra::config::{load_app_config, resolve_data_dir};
use marketeer_infra::crypto::password::Argon2PasswordHasher;
use marketeer_infra::llm::HttpCompletionBackend;
use marketeer_infra::sqlite::chat::SqliteChatRepository;
use marketeer_infra::sqlite::pool::DatabasePool;
use marketeer_infra::sqlite::user::SqliteUserRepository;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository, HttpCompletionBackend>;

pub type ConcreteAuthService = AuthService<SqliteUserRepository, Argon2PasswordHasher>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub auth_service: Arc<ConcreteAuthService>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("marketeer.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_app_config(&data_dir).await;

        // Wire chat service: SQLite store + configured completion backend
        let chat_repo = SqliteChatRepository::new(db_pool.clone());
        let backend = HttpCompletionBackend::from_config(&config.backend);
        let chat_service = ChatService::new(chat_repo, backend);

        // Wire auth service: SQLite users + argon2 hashing
        let user_repo = SqliteUserRepository::new(db_pool.clone());
        let auth_service = AuthService::new(
            user_repo,
            Argon2PasswordHasher::new(),
            chrono::Duration::hours(config.session_ttl_hours as i64),
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            auth_service: Arc::new(auth_service),
            data_dir,
            db_pool,
        })
    }
}
