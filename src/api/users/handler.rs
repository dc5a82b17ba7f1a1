//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{RoleResponse, UpdateRoleRequest, UpsertUserRequest, User, UserStatus};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// POST /api/users/:email - login-time upsert
///
/// First login creates a customer account; later logins return the stored
/// record untouched, so role and verification survive re-login.
pub async fn upsert(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Json(req): Json<UpsertUserRequest>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .upsert(&email, req.name, req.image)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(user))
}

/// PATCH /api/users/:email - self-service seller request
///
/// One pending request per account: a second call while the first is still
/// unreviewed is rejected.
pub async fn request_seller(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    match user {
        Some(ref u) if u.status != Some(UserStatus::Requested) => {}
        _ => {
            return Err(AppError::validation(
                "You have already requested, wait for some time!",
            ));
        }
    }

    let updated = repo
        .set_status(&email, UserStatus::Requested)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    tracing::info!(email = %email, "Seller upgrade requested");
    Ok(Json(updated))
}

/// GET /api/all-users/:email - roster for the admin dashboard, minus the
/// admin's own account
pub async fn list_others(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo
        .find_all_except(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(users))
}

/// PATCH /api/user/role/:email - admin role assignment
pub async fn update_role(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.get_db());
    let updated = repo
        .update_role(&email, req.role)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    tracing::info!(email = %email, role = ?updated.role, "Role updated");
    Ok(Json(updated))
}

/// GET /api/users/role/:email - public role lookup
///
/// Unknown emails read as customers so the storefront can render a default
/// navigation before first login completes.
pub async fn get_role(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<RoleResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let role = user.map(|u| u.role).unwrap_or_default();
    Ok(Json(RoleResponse { role }))
}
