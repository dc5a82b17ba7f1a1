//! Statistics API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::surreal_err_to_app;
use crate::utils::AppResult;

// ============================================================================
// Response Types
// ============================================================================

/// Marketplace totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTotals {
    pub total_users: i64,
    pub total_plants: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
}

/// Per-date order bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Units sold that day
    pub quantity: i64,
    /// Revenue that day
    pub price: f64,
    /// Orders placed that day. The dashboard expects the field as `order`,
    /// which is a reserved word in the query language, so the query aliases
    /// it `orders` and serialization renames it back.
    #[serde(rename(serialize = "order", deserialize = "orders"))]
    pub orders: i64,
}

/// Full admin dashboard response
#[derive(Debug, Clone, Serialize)]
pub struct AdminStatResponse {
    pub total_users: i64,
    pub total_plants: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub chart_data: Vec<ChartPoint>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/admin-stat - dashboard aggregates
pub async fn admin_stat(State(state): State<ServerState>) -> AppResult<Json<AdminStatResponse>> {
    // Query for marketplace totals
    let mut result = state
        .db
        .query(
            r#"
            LET $all_users = (SELECT id FROM user);
            LET $all_plants = (SELECT id FROM plant);
            LET $all_orders = (SELECT price FROM order);

            RETURN {
                total_users: count($all_users),
                total_plants: count($all_plants),
                total_orders: count($all_orders),
                total_revenue: math::sum($all_orders.price) OR 0
            }
        "#,
        )
        .await
        .map_err(surreal_err_to_app)?;

    let totals: StatTotals = result
        .take::<Option<StatTotals>>(3)
        .map_err(surreal_err_to_app)?
        .unwrap_or(StatTotals {
            total_users: 0,
            total_plants: 0,
            total_orders: 0,
            total_revenue: 0.0,
        });

    // Query for the order time series: one bucket per distinct calendar date
    // of placement, sorted ascending
    let mut chart_result = state
        .db
        .query(
            r#"
            SELECT
                time::format(time::from::unix(created_at / 1000), '%Y-%m-%d') AS date,
                math::sum(quantity) AS quantity,
                math::sum(price) AS price,
                count() AS orders
            FROM order
            GROUP BY date
            ORDER BY date
        "#,
        )
        .await
        .map_err(surreal_err_to_app)?;

    let chart_data: Vec<ChartPoint> = chart_result.take(0).map_err(surreal_err_to_app)?;

    Ok(Json(AdminStatResponse {
        total_users: totals.total_users,
        total_plants: totals.total_plants,
        total_orders: totals.total_orders,
        total_revenue: totals.total_revenue,
        chart_data,
    }))
}
