//! Account and session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/auth/register - Create an account
//! - POST /api/v1/auth/login    - Verify credentials, issue a bearer token
//! - POST /api/v1/auth/logout   - Revoke the current session
//! - GET  /api/v1/me            - The resolved calling identity

use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::auth::{generate_token, hash_token, CurrentUser};
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn user_json(user: &marketeer_types::user::User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "created_at": user.created_at,
    })
}

/// POST /api/v1/auth/register - Create an account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username must not be empty".to_string()));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let user = state.auth_service.register(username, email, &req.password).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(user_json(&user), request_id, elapsed)))
}

/// POST /api/v1/auth/login - Verify credentials and issue a session token.
///
/// The plaintext token appears in this response and nowhere else.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let user = state
        .auth_service
        .verify_credentials(req.username.trim(), &req.password)
        .await?;

    let token = generate_token();
    state
        .auth_service
        .open_session(user.id, hash_token(&token))
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({
            "token": token,
            "user": user_json(&user),
        }),
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/auth/logout - Revoke the presented session token.
pub async fn logout(
    State(state): State<AppState>,
    _auth: CurrentUser,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    // CurrentUser already validated the token; re-read it to revoke.
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .or_else(|| {
            headers
                .get("x-session-token")
                .and_then(|v| v.to_str().ok())
                .map(|t| t.trim().to_string())
        })
        .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;

    state.auth_service.close_session(&hash_token(&token)).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"logged_out": true}),
        request_id,
        elapsed,
    )))
}

/// GET /api/v1/me - The resolved calling identity.
pub async fn me(
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(user_json(&user), request_id, elapsed)))
}
