//! Authentication module
//!
//! Cookie-based JWT sessions and role authorization:
//! - [`JwtService`] - token issuance and validation
//! - [`SessionUser`] - authenticated session context
//! - [`require_auth`] - session middleware
//! - [`require_admin`] / [`require_seller`] - role middleware

pub mod cookie;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService, SessionUser};
pub use middleware::{SessionUserExt, require_admin, require_auth, require_seller};
