//! Authentication middleware
//!
//! Axum middleware for session authentication and role authorization.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::AppError;
use crate::auth::{SessionUser, cookie};
use crate::core::ServerState;
use crate::db::models::UserRole;
use crate::db::repository::UserRepository;
use crate::security_log;

/// Authentication middleware - requires a logged-in session
///
/// Extracts the JWT from the `token` cookie and validates it. On success the
/// [`SessionUser`] is injected into request extensions
/// (`req.extensions_mut().insert(user)`).
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/` (falls through to 404)
/// - the public routes listed in [`is_public_route`]
///
/// # Errors
///
/// | Failure | Status |
/// |---------|--------|
/// | No session cookie | 401 Unauthorized |
/// | Token expired | 401 TokenExpired |
/// | Invalid token | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight OPTIONS requests through
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes skip authentication (let them 404 normally)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let token = match cookie::extract_token(req.headers()) {
        Some(token) => token,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = SessionUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// Routes reachable without a session
///
/// Matching is method-aware: `GET /api/plants` is the public catalog while
/// `POST /api/plants` creates a listing and stays behind authentication.
fn is_public_route(method: &Method, path: &str) -> bool {
    if path == "/api/health" {
        return true;
    }

    if *method == Method::POST {
        // Session issuance and the login-time user upsert
        return path == "/api/jwt" || is_single_segment_under(path, "/api/users/");
    }

    if *method == Method::GET {
        return path == "/api/logout"
            || path == "/api/plants"
            || path.starts_with("/api/users/role/")
            || is_public_plant_detail(path);
    }

    false
}

/// `/api/plants/{id}` is public, `/api/plants/seller` is the seller listing
fn is_public_plant_detail(path: &str) -> bool {
    path.strip_prefix("/api/plants/")
        .is_some_and(|rest| !rest.is_empty() && rest != "seller" && !rest.contains('/'))
}

fn is_single_segment_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}

/// Admin middleware - requires the admin role
///
/// The role is read from the user record on every request, not from the
/// token, so demoting an admin takes effect immediately.
///
/// # Errors
///
/// Non-admin sessions get 403 Forbidden.
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let email = req.session_user()?.email.clone();

    let repo = UserRepository::new(state.get_db());
    let record = repo
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let is_admin = matches!(&record, Some(user) if user.role == UserRole::Admin);
    if !is_admin {
        security_log!(
            "WARN",
            "admin_required",
            email = email,
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::forbidden("Admin access required"));
    }

    Ok(next.run(req).await)
}

/// Seller middleware - requires the seller role
///
/// # Errors
///
/// Non-seller sessions get 403 Forbidden.
pub async fn require_seller(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let email = req.session_user()?.email.clone();

    let repo = UserRepository::new(state.get_db());
    let record = repo
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let is_seller = matches!(&record, Some(user) if user.role == UserRole::Seller);
    if !is_seller {
        security_log!(
            "WARN",
            "seller_required",
            email = email,
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::forbidden("Seller access required"));
    }

    Ok(next.run(req).await)
}

/// Extension method to read the [`SessionUser`] off a request
pub trait SessionUserExt {
    /// Get the SessionUser from request extensions
    ///
    /// # Errors
    ///
    /// Returns 401 Unauthorized when no session was established.
    fn session_user(&self) -> Result<&SessionUser, AppError>;
}

impl SessionUserExt for Request {
    fn session_user(&self) -> Result<&SessionUser, AppError> {
        self.extensions()
            .get::<SessionUser>()
            .ok_or(AppError::unauthorized())
    }
}
