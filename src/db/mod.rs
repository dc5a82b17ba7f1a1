//! Database layer - embedded SurrealDB
//!
//! A single RocksDB-backed SurrealDB instance holds the three tables
//! (`user`, `plant`, `order`). The schema is applied on every boot with
//! `IF NOT EXISTS` definitions, so startup is idempotent.

pub mod models;
pub mod repository;

use anyhow::Result;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Table schema, applied at startup
///
/// Accounts are keyed by email (`user:⟨email⟩`). Order `plant` fields are
/// record links so reports can resolve listing fields through them.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON TABLE user TYPE string;
DEFINE FIELD IF NOT EXISTS email ON TABLE user TYPE string;
DEFINE FIELD IF NOT EXISTS image ON TABLE user TYPE option<string>;
DEFINE FIELD IF NOT EXISTS role ON TABLE user TYPE string
    ASSERT $value INSIDE ['customer', 'seller', 'admin'];
DEFINE FIELD IF NOT EXISTS status ON TABLE user TYPE option<string>;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE user TYPE int;
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;

DEFINE TABLE IF NOT EXISTS plant SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON TABLE plant TYPE string;
DEFINE FIELD IF NOT EXISTS category ON TABLE plant TYPE string;
DEFINE FIELD IF NOT EXISTS description ON TABLE plant TYPE string;
DEFINE FIELD IF NOT EXISTS price ON TABLE plant TYPE number;
DEFINE FIELD IF NOT EXISTS quantity ON TABLE plant TYPE int;
DEFINE FIELD IF NOT EXISTS image ON TABLE plant TYPE string;
DEFINE FIELD IF NOT EXISTS seller ON TABLE plant TYPE object;
DEFINE FIELD IF NOT EXISTS seller.name ON TABLE plant TYPE string;
DEFINE FIELD IF NOT EXISTS seller.email ON TABLE plant TYPE string;
DEFINE FIELD IF NOT EXISTS seller.image ON TABLE plant TYPE option<string>;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE plant TYPE int;
DEFINE INDEX IF NOT EXISTS plant_seller ON TABLE plant FIELDS seller.email;

DEFINE TABLE IF NOT EXISTS order SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS customer ON TABLE order TYPE object;
DEFINE FIELD IF NOT EXISTS customer.name ON TABLE order TYPE string;
DEFINE FIELD IF NOT EXISTS customer.email ON TABLE order TYPE string;
DEFINE FIELD IF NOT EXISTS seller ON TABLE order TYPE string;
DEFINE FIELD IF NOT EXISTS plant ON TABLE order TYPE record<plant>;
DEFINE FIELD IF NOT EXISTS quantity ON TABLE order TYPE int;
DEFINE FIELD IF NOT EXISTS price ON TABLE order TYPE number;
DEFINE FIELD IF NOT EXISTS status ON TABLE order TYPE string
    ASSERT $value INSIDE ['Pending', 'Processing', 'Delivered', 'Cancelled'];
DEFINE FIELD IF NOT EXISTS transaction_id ON TABLE order TYPE string;
DEFINE FIELD IF NOT EXISTS created_at ON TABLE order TYPE int;
DEFINE INDEX IF NOT EXISTS order_customer ON TABLE order FIELDS customer.email;
DEFINE INDEX IF NOT EXISTS order_seller ON TABLE order FIELDS seller;
"#;

/// Database service
///
/// Opens (or creates) the RocksDB store at the given path and applies the
/// schema.
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    pub async fn new(db_path: &str) -> Result<Self> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path).await?;
        db.use_ns("greenhouse").use_db("marketplace").await?;

        define_schema(&db).await?;

        tracing::info!("Database ready at {}", db_path);
        Ok(Self { db })
    }
}

/// Apply the table schema, idempotently
///
/// Exposed separately so tests can define the schema on their own
/// throwaway instances.
pub async fn define_schema(db: &Surreal<Db>) -> Result<()> {
    db.query(SCHEMA).await?.check()?;
    Ok(())
}
