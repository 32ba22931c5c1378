//! Message HTTP handlers: the conversation round-trip surface.
//!
//! Endpoints:
//! - POST /api/v1/chats/{id}/messages - Post a message, get both turns back
//! - GET  /api/v1/chats/{id}/messages - Full ordered history
//! - POST /api/v1/chats/{id}/clear    - Delete history, keep the chat
//!
//! A backend outage is not an error here: the orchestrator persists the
//! advisory as the assistant turn and this layer returns it with HTTP 200.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use marketeer_core::llm::CompletionBackend;
use marketeer_observe::genai_attrs;
use marketeer_types::chat::ChatMessage;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::handlers::chat::{parse_uuid, CHAT_NOT_FOUND};
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

fn message_json(msg: &ChatMessage) -> serde_json::Value {
    serde_json::json!({
        "id": msg.id,
        "role": msg.role,
        "content": msg.content,
        "timestamp": msg.created_at,
    })
}

/// POST /api/v1/chats/{id}/messages - Post a message and run the round-trip.
pub async fn post_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
    Json(req): Json<PostMessageRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if req.message.trim().is_empty() {
        return Err(AppError::Validation("Message must not be empty".to_string()));
    }

    let id = parse_uuid(&chat_id)?;

    let backend = state.chat_service.backend();
    let span = info_span!(
        "chat completion",
        { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_CHAT,
        { genai_attrs::GEN_AI_PROVIDER_NAME } = backend.name(),
        { genai_attrs::GEN_AI_REQUEST_MODEL } = backend.model(),
        { genai_attrs::GEN_AI_CONVERSATION_ID } = %id,
    );

    let exchange = state
        .chat_service
        .post_message(&id, &user.id, &req.message)
        .instrument(span)
        .await?
        .ok_or(AppError::NotFound(CHAT_NOT_FOUND))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({
            "user_message": message_json(&exchange.user_message),
            "bot_response": message_json(&exchange.bot_response),
        }),
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/chats/{id}/messages - Full ordered history.
pub async fn get_history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&chat_id)?;
    let messages = state
        .chat_service
        .history(&id, &user.id)
        .await?
        .ok_or(AppError::NotFound(CHAT_NOT_FOUND))?;

    let history: Vec<serde_json::Value> = messages.iter().map(message_json).collect();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "history": history }),
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/chats/{id}/clear - Delete all messages, keep the chat.
pub async fn clear_history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_uuid(&chat_id)?;
    state
        .chat_service
        .clear(&id, &user.id)
        .await?
        .ok_or(AppError::NotFound(CHAT_NOT_FOUND))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"cleared": true, "chat_id": chat_id}),
        request_id,
        elapsed,
    )))
}
