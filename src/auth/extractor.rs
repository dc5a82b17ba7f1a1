//! Session extractor
//!
//! Lets protected handlers take `user: SessionUser` directly in their
//! signature instead of reading request extensions by hand.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{SessionUser, cookie};
use crate::core::ServerState;
use crate::security_log;

impl FromRequestParts<ServerState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Normally already present, inserted by the auth middleware
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(user.clone());
        }

        // Fall back to validating the cookie directly
        let token = match cookie::extract_token(&parts.headers) {
            Some(token) => token,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        let jwt_service = state.get_jwt_service();
        match jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = SessionUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );

                match e {
                    crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token()),
                }
            }
        }
    }
}
