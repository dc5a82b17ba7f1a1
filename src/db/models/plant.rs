//! Plant listing model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Seller snapshot embedded in each listing
///
/// Copied from the seller's account at listing time, so catalog rows render
/// without a join and keep showing the seller as they were when listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Plant listing record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Unit price, two decimal places
    pub price: f64,
    /// Units in stock; decremented on every sale, never clamped
    pub quantity: i64,
    pub image: String,
    pub seller: SellerInfo,
    /// Unix milliseconds of listing creation
    pub created_at: i64,
}

/// Payload for creating a listing (POST /api/plants)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlantRequest {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub image: String,
    pub seller: SellerInfo,
}

/// Payload for stock adjustment (PATCH /api/plants/quantity/{id})
///
/// `status` selects the direction: `"increase"` adds stock, anything else
/// subtracts it. That mirrors how order cancellation restores stock while a
/// purchase consumes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub quantity_to_update: i64,
    pub status: String,
}
