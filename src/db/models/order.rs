//! Order model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order lifecycle state
///
/// Orders are created `Pending`; sellers move them forward. A `Delivered`
/// order can no longer be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

/// Customer snapshot embedded in each order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
}

/// Order record
///
/// `plant` is a record link to the purchased listing. The listing may be
/// deleted later; reports resolve the link at read time and drop rows whose
/// listing no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub customer: OrderCustomer,
    /// Seller account email
    pub seller: String,
    #[serde(with = "serde_helpers::record_id")]
    pub plant: RecordId,
    pub quantity: i64,
    /// Total paid, two decimal places
    pub price: f64,
    pub status: OrderStatus,
    /// Payment processor transaction id
    pub transaction_id: String,
    /// Unix milliseconds of order placement
    pub created_at: i64,
}

/// Payload for placing an order (POST /api/orders)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer: OrderCustomer,
    pub seller: String,
    /// Listing reference, either `"plant:id"` or the bare key
    pub plant_id: String,
    pub quantity: i64,
    pub price: f64,
    pub transaction_id: String,
}

/// Payload for a status change (PATCH /api/orders/{id})
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Order row joined with its listing, as served by the report endpoints
///
/// Carries the order fields plus `name`/`image`/`category` resolved from the
/// linked plant at query time.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReport {
    pub id: String,
    pub customer: OrderCustomer,
    pub seller: String,
    pub plant: String,
    pub quantity: i64,
    pub price: f64,
    pub status: OrderStatus,
    pub transaction_id: String,
    pub created_at: i64,
    pub name: String,
    pub image: String,
    pub category: String,
}
