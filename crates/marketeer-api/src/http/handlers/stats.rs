//! Dashboard stats handler.
//!
//! GET /api/v1/stats - Account, chat, and message counts.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use marketeer_core::chat::repository::ChatRepository;
use marketeer_core::user::repository::UserRepository;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/stats - Process-wide counters.
pub async fn get_stats(
    State(state): State<AppState>,
    _auth: CurrentUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let users = state.auth_service.users().count_users().await?;
    let chats = state.chat_service.repo().count_chats().await?;
    let messages = state.chat_service.repo().count_messages().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({
            "users": users,
            "chats": chats,
            "messages": messages,
        }),
        request_id,
        elapsed,
    )))
}
