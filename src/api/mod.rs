//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - session token issue / logout
//! - [`users`] - account upsert, seller requests, role administration
//! - [`plants`] - storefront catalog and seller listings
//! - [`orders`] - order placement and order reports
//! - [`statistics`] - admin dashboard aggregates
//! - [`payments`] - payment intent creation

pub mod auth;
pub mod health;

pub mod users;
pub mod plants;
pub mod orders;
pub mod statistics;
pub mod payments;

// Re-export common types for handlers
pub use crate::utils::AppResult;
