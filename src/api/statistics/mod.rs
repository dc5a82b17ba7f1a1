//! Statistics API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Statistics router - admin only
pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/api/admin-stat", get(handler::admin_stat))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
}
