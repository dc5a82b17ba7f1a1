//! Unified Result Types
//!
//! Type alias shared by HTTP handlers and application logic

use crate::AppError;

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;
