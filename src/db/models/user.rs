//! User account model
//!
//! Accounts are keyed by email: the record id is `user:⟨email⟩`, so the
//! login-time upsert cannot race itself into duplicates.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Account role
///
/// Everyone starts as `customer`. Sellers are promoted by an admin after
/// requesting an upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Seller,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Customer
    }
}

/// Seller-upgrade request state
///
/// Absent until the user asks to become a seller; `Requested` while the
/// request is pending; `Verified` once an admin assigns a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Requested,
    Verified,
}

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// Unix milliseconds of first login
    pub created_at: i64,
}

/// Payload for the login-time upsert (POST /api/users/{email})
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertUserRequest {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Payload for the admin role update (PATCH /api/user/role/{email})
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

/// Response for the public role lookup (GET /api/users/role/{email})
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub role: UserRole,
}
