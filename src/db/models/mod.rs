//! Database models
//!
//! Record structs and request/response DTOs for the three tables:
//! `user`, `plant`, `order`.

pub mod order;
pub mod plant;
pub mod serde_helpers;
pub mod user;

pub use order::{
    CreateOrderRequest, Order, OrderCustomer, OrderReport, OrderStatus, UpdateOrderStatusRequest,
};
pub use plant::{CreatePlantRequest, Plant, SellerInfo, UpdateQuantityRequest};
pub use user::{RoleResponse, UpdateRoleRequest, UpsertUserRequest, User, UserRole, UserStatus};

/// Current time as unix milliseconds, the storage format for `created_at`
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
