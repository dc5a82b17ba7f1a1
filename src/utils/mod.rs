//! Utility module - shared helpers and types
//!
//! - [`AppError`] - application error type
//! - [`AppResult`] - handler result alias
//! - money and logging helpers

pub mod error;
pub mod logger;
pub mod money;
pub mod result;

pub use error::{AppError, ErrorBody};
pub use result::AppResult;
