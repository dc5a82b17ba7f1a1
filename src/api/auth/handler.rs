//! Session Handlers
//!
//! Issues the signed session cookie and clears it again on logout. There is
//! no password step here: identity is established upstream by the web app's
//! OAuth flow, and this endpoint converts a verified email into a cookie.

use axum::{Json, extract::State, http::header, response::IntoResponse, response::Response};
use http::HeaderValue;
use serde::Deserialize;
use serde_json::json;

use crate::auth::cookie;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /api/jwt - sign a session token for `email` and set it as a cookie
pub async fn issue_token(
    State(state): State<ServerState>,
    Json(req): Json<TokenRequest>,
) -> AppResult<Response> {
    let email = req.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(&email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    let max_age = jwt_service.config.expiration_minutes * 60;
    let cookie = cookie::session_cookie(&token, max_age, state.config.is_production());

    tracing::info!(email = %email, "Session issued");

    let mut response = Json(json!({ "success": true })).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Invalid cookie value: {}", e)))?,
    );
    Ok(response)
}

/// GET /api/logout - clear the session cookie
pub async fn logout(State(state): State<ServerState>) -> AppResult<Response> {
    let cookie = cookie::clear_cookie(state.config.is_production());

    let mut response = Json(json!({ "success": true })).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Invalid cookie value: {}", e)))?,
    );
    Ok(response)
}
