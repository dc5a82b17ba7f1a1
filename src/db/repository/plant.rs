//! Plant Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{CreatePlantRequest, Plant, now_millis};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "plant";

/// The public catalog never returns more than this many listings
const CATALOG_LIMIT: usize = 20;

/// Resolve a listing reference into a RecordId
///
/// Accepts both the full `"plant:id"` form and the bare key.
pub fn plant_ref(id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid plant ID: {}", id)))?;
        if thing.table() != TABLE {
            return Err(RepoError::Validation(format!("Invalid plant ID: {}", id)));
        }
        Ok(thing)
    } else {
        Ok(RecordId::from_table_key(TABLE, id))
    }
}

#[derive(Clone)]
pub struct PlantRepository {
    base: BaseRepository,
}

impl PlantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Public catalog, capped at [`CATALOG_LIMIT`] listings
    pub async fn find_all(&self) -> RepoResult<Vec<Plant>> {
        let plants: Vec<Plant> = self
            .base
            .db()
            .query(format!("SELECT * FROM plant LIMIT {}", CATALOG_LIMIT))
            .await?
            .take(0)?;
        Ok(plants)
    }

    /// Find a listing by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Plant>> {
        let thing = plant_ref(id)?;
        let plant: Option<Plant> = self.base.db().select(thing).await?;
        Ok(plant)
    }

    /// All listings owned by a seller
    pub async fn find_by_seller(&self, email: &str) -> RepoResult<Vec<Plant>> {
        let email_owned = email.to_string();
        let plants: Vec<Plant> = self
            .base
            .db()
            .query("SELECT * FROM plant WHERE seller.email = $email")
            .bind(("email", email_owned))
            .await?
            .take(0)?;
        Ok(plants)
    }

    /// Create a new listing
    pub async fn create(&self, data: CreatePlantRequest) -> RepoResult<Plant> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE plant SET
                    name = $name,
                    category = $category,
                    description = $description,
                    price = $price,
                    quantity = $quantity,
                    image = $image,
                    seller = $seller,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("quantity", data.quantity))
            .bind(("image", data.image))
            .bind(("seller", data.seller))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<Plant> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create plant".to_string()))
    }

    /// Adjust stock by a signed delta, in place on the record
    ///
    /// Negative deltas are applied as-is; the count is allowed to go
    /// negative so oversold stock is visible instead of silently clamped.
    /// Returns `None` when the listing does not exist.
    pub async fn adjust_quantity(&self, id: &str, delta: i64) -> RepoResult<Option<Plant>> {
        let thing = plant_ref(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $plant SET quantity += $delta RETURN AFTER")
            .bind(("plant", thing))
            .bind(("delta", delta))
            .await?;
        let updated: Option<Plant> = result.take(0)?;
        Ok(updated)
    }

    /// Delete a listing
    ///
    /// Orders keep their record link to the deleted listing; reports drop
    /// those rows at read time.
    pub async fn delete(&self, id: &str) -> RepoResult<Option<Plant>> {
        let thing = plant_ref(id)?;
        let deleted: Option<Plant> = self.base.db().delete(thing).await?;
        Ok(deleted)
    }
}
