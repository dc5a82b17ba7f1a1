//! Plant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::SessionUser;
use crate::core::ServerState;
use crate::db::models::{CreatePlantRequest, Plant, UpdateQuantityRequest};
use crate::db::repository::{PlantRepository, repo_err_to_app};
use crate::utils::{AppError, AppResult};

/// GET /api/plants - storefront listing (capped, newest-first is not
/// guaranteed; the storefront sorts client-side)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Plant>>> {
    let repo = PlantRepository::new(state.get_db());
    let plants = repo
        .find_all()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(plants))
}

/// GET /api/plants/:id - single plant detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Plant>> {
    let repo = PlantRepository::new(state.get_db());
    let plant = repo
        .find_by_id(&id)
        .await
        .map_err(repo_err_to_app)?
        .ok_or_else(|| AppError::not_found("Plant not found"))?;

    Ok(Json(plant))
}

/// POST /api/plants - create a listing
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreatePlantRequest>,
) -> AppResult<Json<Plant>> {
    let repo = PlantRepository::new(state.get_db());
    let plant = repo
        .create(req)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(name = %plant.name, seller = %plant.seller.email, "Plant listed");
    Ok(Json(plant))
}

/// GET /api/plants/seller - the caller's own listings
///
/// Keyed on the verified session email, never on a query parameter, so a
/// seller cannot read another seller's inventory view.
pub async fn list_for_seller(
    State(state): State<ServerState>,
    user: SessionUser,
) -> AppResult<Json<Vec<Plant>>> {
    let repo = PlantRepository::new(state.get_db());
    let plants = repo
        .find_by_seller(&user.email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(plants))
}

/// DELETE /api/plants/:id - remove a listing
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Plant>> {
    let repo = PlantRepository::new(state.get_db());
    let removed = repo
        .delete(&id)
        .await
        .map_err(repo_err_to_app)?
        .ok_or_else(|| AppError::not_found("Plant not found"))?;

    tracing::info!(name = %removed.name, "Plant delisted");
    Ok(Json(removed))
}

/// PATCH /api/plants/quantity/:id - stock adjustment
///
/// `status: "increase"` adds, anything else subtracts. The decrement is not
/// clamped at zero; oversold stock shows up as a negative quantity for the
/// seller to reconcile.
pub async fn adjust_quantity(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> AppResult<Json<Plant>> {
    let delta = if req.status == "increase" {
        req.quantity_to_update
    } else {
        -req.quantity_to_update
    };

    let repo = PlantRepository::new(state.get_db());
    let updated = repo
        .adjust_quantity(&id, delta)
        .await
        .map_err(repo_err_to_app)?
        .ok_or_else(|| AppError::not_found("Plant not found"))?;

    Ok(Json(updated))
}
