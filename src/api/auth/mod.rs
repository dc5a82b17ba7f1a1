//! Session Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build session router
/// - /api/jwt: public (no auth required)
/// - /api/logout: public (clearing a session must work with a dead cookie)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/jwt", post(handler::issue_token))
        .route("/api/logout", get(handler::logout))
}
