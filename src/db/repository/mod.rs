//! Repository Module
//!
//! CRUD operations for the SurrealDB tables, one repository per table.

pub mod order;
pub mod plant;
pub mod user;

pub use order::OrderRepository;
pub use plant::PlantRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Map a repository error onto the HTTP error space
pub fn repo_err_to_app(e: RepoError) -> AppError {
    match e {
        RepoError::NotFound(msg) => AppError::not_found(msg),
        RepoError::Duplicate(msg) => AppError::conflict(msg),
        RepoError::Validation(msg) => AppError::validation(msg),
        RepoError::Database(msg) => AppError::database(msg),
    }
}

/// Map a raw SurrealDB error onto the HTTP error space
///
/// For handlers that query the database directly instead of going through a
/// repository.
pub fn surreal_err_to_app(e: surrealdb::Error) -> AppError {
    AppError::database(e.to_string())
}

// =============================================================================
// ID Convention: "table:id" strings everywhere across the stack
// =============================================================================
//
// surrealdb::RecordId handles all ids:
//   - parse: let id: RecordId = "plant:abc".parse()?;
//   - build: let id = RecordId::from_table_key("plant", "abc");
//   - table name: id.table()
//   - bare key: id.key().to_string()
//   - CRUD: db.select(id) / db.delete(id) take a RecordId directly

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
