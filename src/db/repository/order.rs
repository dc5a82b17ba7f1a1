//! Order Repository
//!
//! Orders hold a record link to the purchased listing. The report queries
//! resolve `plant.name` / `plant.image` / `plant.category` through that link
//! at read time; when the listing has been deleted since, those fields come
//! back NONE and the row is dropped from the report.

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::plant::plant_ref;
use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    CreateOrderRequest, Order, OrderCustomer, OrderReport, OrderStatus, now_millis, serde_helpers,
};

const TABLE: &str = "order";

/// Resolve an order reference into a RecordId
fn order_ref(id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid order ID: {}", id)))?;
        if thing.table() != TABLE {
            return Err(RepoError::Validation(format!("Invalid order ID: {}", id)));
        }
        Ok(thing)
    } else {
        Ok(RecordId::from_table_key(TABLE, id))
    }
}

/// Raw report row before the dangling-listing filter
#[derive(Debug, Deserialize)]
struct OrderReportRow {
    #[serde(default, with = "serde_helpers::option_record_id")]
    id: Option<RecordId>,
    customer: OrderCustomer,
    seller: String,
    #[serde(with = "serde_helpers::record_id")]
    plant: RecordId,
    quantity: i64,
    price: f64,
    status: OrderStatus,
    transaction_id: String,
    created_at: i64,
    name: Option<String>,
    image: Option<String>,
    category: Option<String>,
}

impl OrderReportRow {
    /// A row only makes it into the report when its listing still resolves
    fn into_report(self) -> Option<OrderReport> {
        let name = self.name?;
        Some(OrderReport {
            id: self.id.map(|id| id.to_string()).unwrap_or_default(),
            customer: self.customer,
            seller: self.seller,
            plant: self.plant.to_string(),
            quantity: self.quantity,
            price: self.price,
            status: self.status,
            transaction_id: self.transaction_id,
            created_at: self.created_at,
            name,
            image: self.image.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
        })
    }
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = order_ref(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Persist a new order in `Pending` state
    ///
    /// The listing reference is bound as a RecordId so the `plant` field is
    /// stored as a real record link, not a string.
    pub async fn create(&self, data: CreateOrderRequest) -> RepoResult<Order> {
        let plant = plant_ref(&data.plant_id)?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    customer = $customer,
                    seller = $seller,
                    plant = $plant,
                    quantity = $quantity,
                    price = $price,
                    status = $status,
                    transaction_id = $transaction_id,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("customer", data.customer))
            .bind(("seller", data.seller))
            .bind(("plant", plant))
            .bind(("quantity", data.quantity))
            .bind(("price", data.price))
            .bind(("status", OrderStatus::Pending))
            .bind(("transaction_id", data.transaction_id))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Move an order through its lifecycle
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let thing = order_ref(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $order SET status = $status RETURN AFTER")
            .bind(("order", thing))
            .bind(("status", status))
            .await?;
        let updated: Option<Order> = result.take(0)?;
        Ok(updated)
    }

    /// Delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = order_ref(id)?;
        let deleted: Option<Order> = self.base.db().delete(thing).await?;
        Ok(deleted)
    }

    /// Purchase history for a customer, joined with the listings
    pub async fn customer_report(&self, email: &str) -> RepoResult<Vec<OrderReport>> {
        let email_owned = email.to_string();
        let rows: Vec<OrderReportRow> = self
            .base
            .db()
            .query(
                r#"SELECT *,
                    plant.name AS name,
                    plant.image AS image,
                    plant.category AS category
                FROM order
                WHERE customer.email = $email"#,
            )
            .bind(("email", email_owned))
            .await?
            .take(0)?;

        Ok(rows.into_iter().filter_map(OrderReportRow::into_report).collect())
    }

    /// Incoming orders for a seller, joined with the listings
    pub async fn seller_report(&self, email: &str) -> RepoResult<Vec<OrderReport>> {
        let email_owned = email.to_string();
        let rows: Vec<OrderReportRow> = self
            .base
            .db()
            .query(
                r#"SELECT *,
                    plant.name AS name,
                    plant.image AS image,
                    plant.category AS category
                FROM order
                WHERE seller = $email"#,
            )
            .bind(("email", email_owned))
            .await?
            .take(0)?;

        Ok(rows.into_iter().filter_map(OrderReportRow::into_report).collect())
    }
}
