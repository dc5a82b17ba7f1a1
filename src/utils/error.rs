//! Unified error handling
//!
//! Provides the application error type and the JSON error body:
//! - [`AppError`] - application error enum
//! - [`ErrorBody`] - wire format for error responses
//!
//! # Status mapping
//!
//! | Variant | Status | `error` code |
//! |---------|--------|--------------|
//! | Unauthorized / TokenExpired / InvalidToken | 401 | `unauthorized` / `token_expired` / `invalid_token` |
//! | Forbidden | 403 | `forbidden` |
//! | NotFound | 404 | `not_found` |
//! | Validation | 400 | `invalid_input` |
//! | Conflict | 409 | `conflict` |
//! | Database | 500 | `database_error` |
//! | Payment | 502 | `payment_error` |
//! | Internal | 500 | `internal_error` |
//!
//! Database, Payment and Internal errors log the full detail server-side and
//! return a generic message to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Wire format for error responses
///
/// ```json
/// {
///   "error": "not_found",
///   "message": "Plant not found"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable error code
    pub error: String,
    /// Human-readable message
    pub message: String,
}

/// Application error enum
///
/// | Category | Variants |
/// |----------|----------|
/// | Authentication | Unauthorized, TokenExpired, InvalidToken |
/// | Authorization | Forbidden |
/// | Business | NotFound, Conflict, Validation |
/// | System | Database, Payment, Internal |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401) ==========
    /// No session cookie or no token at all
    #[error("Authentication required")]
    Unauthorized,

    /// Token was valid once, but its exp is in the past
    #[error("Token expired")]
    TokenExpired,

    /// Token failed signature or claim validation
    #[error("Invalid token")]
    InvalidToken,

    /// Authenticated but lacking the required role (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business (4xx) ==========
    /// Resource does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Resource state conflict (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request payload failed validation (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== System (5xx) ==========
    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Payment processor error (502)
    #[error("Payment processor error: {0}")]
    Payment(String),

    /// Internal error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Please login first".to_string(),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "token_expired",
                "Token expired".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid token".to_string(),
            ),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg.clone()),

            // Full detail stays server-side for the 5xx family
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Payment(msg) => {
                error!(target: "payment", error = %msg, "Payment processor error occurred");
                (
                    StatusCode::BAD_GATEWAY,
                    "payment_error",
                    "Payment processor error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            error: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn payment(msg: impl Into<String>) -> Self {
        Self::Payment(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn status_mapping() {
        let cases = [
            (AppError::unauthorized(), StatusCode::UNAUTHORIZED),
            (AppError::token_expired(), StatusCode::UNAUTHORIZED),
            (AppError::invalid_token(), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("nope"), StatusCode::FORBIDDEN),
            (AppError::not_found("missing"), StatusCode::NOT_FOUND),
            (AppError::conflict("exists"), StatusCode::CONFLICT),
            (AppError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                AppError::database("db down"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::payment("stripe down"), StatusCode::BAD_GATEWAY),
            (
                AppError::internal("oops"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = err.into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
