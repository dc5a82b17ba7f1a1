use thiserror::Error;

/// Fatal server errors (boot and shutdown path)
///
/// Request-level errors use [`crate::utils::AppError`]; this type only
/// covers failures that should stop the process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server lifecycle functions
pub type Result<T> = std::result::Result<T, ServerError>;
