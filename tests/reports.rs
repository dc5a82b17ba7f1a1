//! Repository coverage: report joins, account lifecycle, stock arithmetic
//! Run: cargo test --test reports -- --nocapture

use greenhouse_server::db::define_schema;
use greenhouse_server::db::models::{
    CreateOrderRequest, CreatePlantRequest, OrderCustomer, OrderStatus, SellerInfo, UserRole,
    UserStatus,
};
use greenhouse_server::db::repository::{OrderRepository, PlantRepository, UserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    define_schema(&db).await.unwrap();
    (tmp, db)
}

fn listing(name: &str, seller_email: &str, quantity: i64) -> CreatePlantRequest {
    CreatePlantRequest {
        name: name.to_string(),
        category: "indoor".to_string(),
        description: "Lush and low maintenance".to_string(),
        price: 9.99,
        quantity,
        image: format!("https://img.example.com/{}.jpg", name),
        seller: SellerInfo {
            name: "Grower".to_string(),
            email: seller_email.to_string(),
            image: None,
        },
    }
}

fn purchase(plant_id: &str, buyer: &str, seller: &str, quantity: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        customer: OrderCustomer {
            name: "Buyer".to_string(),
            email: buyer.to_string(),
        },
        seller: seller.to_string(),
        plant_id: plant_id.to_string(),
        quantity,
        price: 9.99 * quantity as f64,
        transaction_id: format!("pi_test_{}", quantity),
    }
}

#[tokio::test]
async fn report_rows_include_listing_fields() {
    let (_tmp, db) = test_db().await;
    let plants = PlantRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let plant = plants.create(listing("Ficus", "seller@example.com", 5)).await.unwrap();
    let plant_id = plant.id.unwrap().to_string();
    println!("created listing {}", plant_id);

    orders
        .create(purchase(&plant_id, "buyer@example.com", "seller@example.com", 2))
        .await
        .unwrap();

    let report = orders.customer_report("buyer@example.com").await.unwrap();
    assert_eq!(report.len(), 1, "one order placed, one report row");

    let row = &report[0];
    assert_eq!(row.name, "Ficus", "row carries the listing name");
    assert_eq!(row.category, "indoor", "row carries the listing category");
    assert_eq!(row.image, "https://img.example.com/Ficus.jpg");
    assert_eq!(row.plant, plant_id, "record link serialized as table:id");
    assert_eq!(row.status, OrderStatus::Pending);

    let seller_side = orders.seller_report("seller@example.com").await.unwrap();
    assert_eq!(seller_side.len(), 1, "same order visible from the seller side");
    assert_eq!(seller_side[0].name, "Ficus");

    // No rows for uninvolved parties
    assert!(orders.customer_report("nobody@example.com").await.unwrap().is_empty());
    assert!(orders.seller_report("nobody@example.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn dangling_listing_rows_are_dropped() {
    let (_tmp, db) = test_db().await;
    let plants = PlantRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let kept = plants.create(listing("Kept", "seller@example.com", 5)).await.unwrap();
    let doomed = plants.create(listing("Doomed", "seller@example.com", 5)).await.unwrap();
    let kept_id = kept.id.unwrap().to_string();
    let doomed_id = doomed.id.unwrap().to_string();

    orders
        .create(purchase(&kept_id, "buyer@example.com", "seller@example.com", 1))
        .await
        .unwrap();
    orders
        .create(purchase(&doomed_id, "buyer@example.com", "seller@example.com", 1))
        .await
        .unwrap();

    let before = orders.customer_report("buyer@example.com").await.unwrap();
    assert_eq!(before.len(), 2, "both rows visible while both listings exist");

    plants.delete(&doomed_id).await.unwrap().expect("listing should delete");

    let after = orders.customer_report("buyer@example.com").await.unwrap();
    assert_eq!(after.len(), 1, "row pointing at the deleted listing is dropped");
    assert_eq!(after[0].name, "Kept");
}

#[tokio::test]
async fn login_upsert_returns_stored_record() {
    let (_tmp, db) = test_db().await;
    let users = UserRepository::new(db.clone());

    let first = users
        .upsert("gardener@example.com", "Gardener".to_string(), None)
        .await
        .unwrap();
    assert_eq!(first.role, UserRole::Customer, "fresh accounts start as customers");
    assert_eq!(first.status, None);

    // Promotion between logins
    users
        .update_role("gardener@example.com", UserRole::Seller)
        .await
        .unwrap()
        .expect("account exists");

    // A later login with a different display name must not reset anything
    let second = users
        .upsert("gardener@example.com", "Impostor".to_string(), None)
        .await
        .unwrap();
    assert_eq!(second.name, "Gardener", "stored record wins over the upsert payload");
    assert_eq!(second.role, UserRole::Seller, "role survives re-login");
    assert_eq!(second.status, Some(UserStatus::Verified));
}

#[tokio::test]
async fn role_update_closes_pending_request() {
    let (_tmp, db) = test_db().await;
    let users = UserRepository::new(db.clone());

    users
        .upsert("hopeful@example.com", "Hopeful".to_string(), None)
        .await
        .unwrap();
    let requested = users
        .set_status("hopeful@example.com", UserStatus::Requested)
        .await
        .unwrap()
        .expect("account exists");
    assert_eq!(requested.status, Some(UserStatus::Requested));

    let promoted = users
        .update_role("hopeful@example.com", UserRole::Seller)
        .await
        .unwrap()
        .expect("account exists");
    assert_eq!(promoted.role, UserRole::Seller);
    assert_eq!(promoted.status, Some(UserStatus::Verified), "promotion closes the request");

    // Updating a missing account reports None, not an error
    let missing = users.update_role("ghost@example.com", UserRole::Admin).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn stock_adjustment_is_signed_and_unclamped() {
    let (_tmp, db) = test_db().await;
    let plants = PlantRepository::new(db.clone());

    let plant = plants.create(listing("Cactus", "seller@example.com", 10)).await.unwrap();
    let id = plant.id.unwrap().to_string();

    let after = plants.adjust_quantity(&id, -3).await.unwrap().unwrap();
    assert_eq!(after.quantity, 7);

    let after = plants.adjust_quantity(&id, 5).await.unwrap().unwrap();
    assert_eq!(after.quantity, 12);

    // Driving past zero is allowed; oversell shows up as negative stock
    let after = plants.adjust_quantity(&id, -20).await.unwrap().unwrap();
    assert_eq!(after.quantity, -8, "no clamping at zero");

    let missing = plants.adjust_quantity("plant:doesnotexist", 1).await.unwrap();
    assert!(missing.is_none(), "missing listing is None, not an error");
}

#[tokio::test]
async fn catalog_is_capped_at_twenty() {
    let (_tmp, db) = test_db().await;
    let plants = PlantRepository::new(db.clone());

    for i in 0..25 {
        plants
            .create(listing(&format!("Plant{}", i), "seller@example.com", 1))
            .await
            .unwrap();
    }

    let catalog = plants.find_all().await.unwrap();
    assert_eq!(catalog.len(), 20, "public catalog page is capped");

    let mine = plants.find_by_seller("seller@example.com").await.unwrap();
    assert_eq!(mine.len(), 25, "the seller's own view is not capped");
}

#[tokio::test]
async fn order_lifecycle_at_the_repository() {
    let (_tmp, db) = test_db().await;
    let plants = PlantRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());

    let plant = plants.create(listing("Fern", "seller@example.com", 3)).await.unwrap();
    let plant_id = plant.id.unwrap().to_string();

    let order = orders
        .create(purchase(&plant_id, "buyer@example.com", "seller@example.com", 1))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending, "orders start Pending");
    let order_id = order.id.unwrap().to_string();

    let updated = orders
        .update_status(&order_id, OrderStatus::Processing)
        .await
        .unwrap()
        .expect("order exists");
    assert_eq!(updated.status, OrderStatus::Processing);

    let deleted = orders.delete(&order_id).await.unwrap();
    assert!(deleted.is_some(), "delete returns the removed order");
    assert!(orders.find_by_id(&order_id).await.unwrap().is_none());

    // Deleting again is a no-op
    assert!(orders.delete(&order_id).await.unwrap().is_none());
}
