//! Payment API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;

use crate::core::ServerState;
use crate::db::repository::{PlantRepository, repo_err_to_app};
use crate::services::payments;
use crate::utils::{AppError, AppResult, money};

/// Checkout request. The storefront sends `quantity` as whatever its form
/// produced, so it is accepted as either a number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    pub plant_id: String,
    pub quantity: serde_json::Value,
}

fn parse_quantity(value: &serde_json::Value) -> Option<i64> {
    let quantity = match value {
        serde_json::Value::Number(n) => n.as_i64()?,
        serde_json::Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (quantity > 0).then_some(quantity)
}

/// POST /api/create-payment-intent - open a card payment for one listing
///
/// Price and quantity are validated before the processor is contacted; a
/// request that cannot produce a valid charge amount never leaves the
/// server.
pub async fn create_payment_intent(
    State(state): State<ServerState>,
    Json(req): Json<CreateIntentRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = PlantRepository::new(state.get_db());
    let plant = repo
        .find_by_id(&req.plant_id)
        .await
        .map_err(repo_err_to_app)?
        .ok_or_else(|| AppError::not_found("Plant not found"))?;

    let quantity = parse_quantity(&req.quantity)
        .ok_or_else(|| AppError::validation("Quantity must be a positive number"))?;

    let amount = money::to_minor_units(plant.price, quantity)
        .ok_or_else(|| AppError::validation("Plant price is not a valid amount"))?;

    let intent = payments::create_payment_intent(
        &state.config.stripe_secret_key,
        amount,
        &state.config.payment_currency,
    )
    .await
    .map_err(|e| AppError::payment(e.to_string()))?;

    tracing::info!(
        intent = %intent.id,
        plant = %req.plant_id,
        amount_minor = amount,
        "Payment intent created"
    );

    Ok(Json(json!({ "clientSecret": intent.client_secret })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_quantity(&json!(3)), Some(3));
        assert_eq!(parse_quantity(&json!("3")), Some(3));
        assert_eq!(parse_quantity(&json!(" 12 ")), Some(12));
    }

    #[test]
    fn quantity_rejects_junk() {
        assert_eq!(parse_quantity(&json!("three")), None);
        assert_eq!(parse_quantity(&json!(0)), None);
        assert_eq!(parse_quantity(&json!(-2)), None);
        assert_eq!(parse_quantity(&json!(2.5)), None);
        assert_eq!(parse_quantity(&json!(null)), None);
        assert_eq!(parse_quantity(&json!({"n": 3})), None);
    }
}
