//! Order API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::require_seller;
use crate::core::ServerState;

/// Order router
/// - POST /api/orders, DELETE /api/orders/{id},
///   GET /api/customer-orders/{email}: any authenticated user
/// - PATCH /api/orders/{id}, GET /api/seller-orders/{email}: seller only
pub fn router(state: &ServerState) -> Router<ServerState> {
    let authed_routes = Router::new()
        .route("/api/orders", post(handler::create))
        .route("/api/orders/{id}", delete(handler::cancel))
        .route("/api/customer-orders/{email}", get(handler::customer_orders));

    let seller_routes = Router::new()
        .route("/api/orders/{id}", patch(handler::update_status))
        .route("/api/seller-orders/{email}", get(handler::seller_orders))
        .layer(middleware::from_fn_with_state(state.clone(), require_seller));

    authed_routes.merge(seller_routes)
}
