//! User API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// User router
/// - POST /api/users/{email}, GET /api/users/role/{email}: public
/// - PATCH /api/users/{email}: any authenticated user (global require_auth)
/// - GET /api/all-users/{email}, PATCH /api/user/role/{email}: admin only
pub fn router(state: &ServerState) -> Router<ServerState> {
    let open_routes = Router::new()
        .route(
            "/api/users/{email}",
            post(handler::upsert).patch(handler::request_seller),
        )
        .route("/api/users/role/{email}", get(handler::get_role));

    let admin_routes = Router::new()
        .route("/api/all-users/{email}", get(handler::list_others))
        .route("/api/user/role/{email}", patch(handler::update_role))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    open_routes.merge(admin_routes)
}
