//! Payment API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Payment router - any authenticated user (global require_auth)
pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/create-payment-intent",
        post(handler::create_payment_intent),
    )
}
