//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{CreateOrderRequest, Order, OrderReport, OrderStatus, UpdateOrderStatusRequest};
use crate::db::repository::{OrderRepository, PlantRepository, repo_err_to_app};
use crate::services::mailer;
use crate::utils::{AppError, AppResult};

/// POST /api/orders - place an order after the payment confirmed client-side
///
/// Three steps, deliberately not one transaction: insert the order, then an
/// atomic `quantity -= n` on the listing, then fire-and-forget notification
/// emails. A crash between the first two leaves stock overstated, which the
/// seller reconciles; the decrement itself never loses concurrent updates.
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    let plant_id = req.plant_id.clone();

    let orders = OrderRepository::new(state.get_db());
    let order = orders.create(req).await.map_err(repo_err_to_app)?;

    let plants = PlantRepository::new(state.get_db());
    let plant = plants
        .adjust_quantity(&plant_id, -order.quantity)
        .await
        .map_err(repo_err_to_app)?;

    tracing::info!(
        customer = %order.customer.email,
        seller = %order.seller,
        plant = %plant_id,
        quantity = order.quantity,
        "Order placed"
    );

    match plant {
        Some(plant) if state.config.email_enabled => {
            let ses = state.ses.clone();
            let from = state.config.email_from.clone();
            let customer = order.customer.clone();
            let seller = order.seller.clone();
            let quantity = order.quantity;
            let total = order.price;

            tokio::spawn(async move {
                if let Err(e) = mailer::send_order_confirmation(
                    &ses, &from, &customer.email, &plant.name, quantity, total,
                )
                .await
                {
                    tracing::warn!(to = %customer.email, "Order confirmation failed: {}", e);
                }
                if let Err(e) = mailer::send_order_notice(
                    &ses, &from, &seller, &plant.name, quantity, &customer.email,
                )
                .await
                {
                    tracing::warn!(to = %seller, "Order notice failed: {}", e);
                }
            });
        }
        Some(_) => {}
        None => {
            tracing::warn!(plant = %plant_id, "Ordered listing vanished before stock decrement");
        }
    }

    Ok(Json(order))
}

/// GET /api/customer-orders/:email - a customer's order history, each row
/// joined with the listing it bought
pub async fn customer_orders(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<OrderReport>>> {
    let repo = OrderRepository::new(state.get_db());
    let report = repo
        .customer_report(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(report))
}

/// GET /api/seller-orders/:email - incoming orders for a seller
pub async fn seller_orders(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<OrderReport>>> {
    let repo = OrderRepository::new(state.get_db());
    let report = repo
        .seller_report(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(report))
}

/// PATCH /api/orders/:id - seller moves an order through its lifecycle
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let updated = repo
        .update_status(&id, req.status)
        .await
        .map_err(repo_err_to_app)?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    tracing::info!(order = %id, status = ?updated.status, "Order status updated");
    Ok(Json(updated))
}

/// DELETE /api/orders/:id - customer cancellation
///
/// Refuses once the order is delivered; the row stays in place for the 409
/// case.
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await
        .map_err(repo_err_to_app)?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    if order.status == OrderStatus::Delivered {
        return Err(AppError::conflict(
            "Cannot cancel an order once it has been delivered",
        ));
    }

    let removed = repo
        .delete(&id)
        .await
        .map_err(repo_err_to_app)?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    tracing::info!(order = %id, "Order cancelled");
    Ok(Json(removed))
}
