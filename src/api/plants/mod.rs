//! Plant API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::require_seller;
use crate::core::ServerState;

/// Plant router
/// - GET /api/plants, GET /api/plants/{id}: public storefront reads
/// - PATCH /api/plants/quantity/{id}: any authenticated user (checkout path)
/// - POST /api/plants, GET /api/plants/seller, DELETE /api/plants/{id}:
///   seller only
pub fn router(state: &ServerState) -> Router<ServerState> {
    let open_routes = Router::new()
        .route("/api/plants", get(handler::list))
        .route("/api/plants/{id}", get(handler::get_by_id))
        .route("/api/plants/quantity/{id}", patch(handler::adjust_quantity));

    let seller_routes = Router::new()
        .route("/api/plants", post(handler::create))
        .route("/api/plants/seller", get(handler::list_for_seller))
        .route("/api/plants/{id}", delete(handler::delete))
        .layer(middleware::from_fn_with_state(state.clone(), require_seller));

    open_routes.merge(seller_routes)
}
