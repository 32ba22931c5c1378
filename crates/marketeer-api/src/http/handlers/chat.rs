//! Chat CRUD HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/chats      - Create a chat (persists the welcome turn)
//! - GET  /api/v1/chats      - List the caller's chats, newest first
//! - GET  /api/v1/chats/{id} - Chat metadata, owned chats only
//!
//! A chat owned by someone else is a 404, never a 403 — existence of other
//! owners' chats is not revealed.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use marketeer_types::chat::{Chat, ChatKind};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

pub(crate) const CHAT_NOT_FOUND: &str = "Chat not found";

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub name: String,
    /// Raw kind tag; unknown tags are accepted and fall back to the generic
    /// assistant behavior.
    pub kind: String,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

fn chat_json(chat: &Chat) -> serde_json::Value {
    serde_json::json!({
        "id": chat.id,
        "name": chat.name,
        "kind": chat.kind,
        "created_at": chat.created_at,
    })
}

/// POST /api/v1/chats - Create a chat and persist its welcome message.
pub async fn create_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateChatRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Chat name must not be empty".to_string()));
    }

    let chat = state
        .chat_service
        .create_chat(user.id, name.to_string(), ChatKind::from_tag(req.kind.trim()))
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(chat_json(&chat), request_id, elapsed)))
}

/// GET /api/v1/chats - List the caller's chats, most recent first.
pub async fn list_chats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let chats = state.chat_service.list_chats(&user.id).await?;
    let chats_json: Vec<serde_json::Value> = chats.iter().map(chat_json).collect();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(chats_json, request_id, elapsed)))
}

/// GET /api/v1/chats/{id} - Chat metadata, owned chats only.
pub async fn get_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&chat_id)?;
    let chat = state
        .chat_service
        .get_chat(&id, &user.id)
        .await?
        .ok_or(AppError::NotFound(CHAT_NOT_FOUND))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(chat_json(&chat), request_id, elapsed)))
}
