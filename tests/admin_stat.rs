//! Admin dashboard aggregates through the full HTTP middleware stack
//! Run: cargo test --test admin_stat -- --nocapture

use axum::body::Body;
use greenhouse_server::db::models::UserRole;
use greenhouse_server::db::repository::UserRepository;
use greenhouse_server::{Config, ServerState};
use http::{Method, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};

/// Fresh server state against a throwaway working directory
async fn test_state() -> (tempfile::TempDir, ServerState) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    (tmp, state)
}

/// Drive one request through the router, returning status and parsed body
async fn call(
    state: &ServerState,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = http::Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(http::header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = state.http.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// POST /api/jwt and return the `token=...` cookie pair
async fn login(state: &ServerState, email: &str) -> String {
    let request = http::Request::builder()
        .method(Method::POST)
        .uri("/api/jwt")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": email }).to_string()))
        .unwrap();

    let response = state.http.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    let set_cookie = response
        .headers()
        .get(http::header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}

/// Create an account over the API, optionally promote it through the repo
async fn seed_user(state: &ServerState, email: &str, name: &str, role: Option<UserRole>) {
    let (status, _) = call(
        state,
        Method::POST,
        &format!("/api/users/{}", email),
        None,
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "user upsert should succeed");

    if let Some(role) = role {
        UserRepository::new(state.get_db())
            .update_role(email, role)
            .await
            .unwrap()
            .expect("seeded user should exist");
    }
}

/// Verified seller plus one ten-dollar listing; returns the listing id
async fn seed_listing(state: &ServerState, seller_email: &str) -> String {
    seed_user(state, seller_email, "Succulent Stand", Some(UserRole::Seller)).await;
    let cookie = login(state, seller_email).await;

    let (status, plant) = call(
        state,
        Method::POST,
        "/api/plants",
        Some(&cookie),
        Some(json!({
            "name": "Jade Plant",
            "category": "succulent",
            "description": "Low maintenance money tree",
            "price": 10.0,
            "quantity": 50,
            "image": "https://img.example.com/jade.jpg",
            "seller": {
                "name": "Succulent Stand",
                "email": seller_email,
                "image": null
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "listing creation should succeed");

    plant["id"].as_str().expect("plant id in response").to_string()
}

/// Place an order through the API
async fn place_order(
    state: &ServerState,
    cookie: &str,
    buyer_email: &str,
    plant_id: &str,
    seller: &str,
    quantity: i64,
    price: f64,
    transaction_id: &str,
) {
    let (status, _) = call(
        state,
        Method::POST,
        "/api/orders",
        Some(cookie),
        Some(json!({
            "customer": { "name": "Chart Buyer", "email": buyer_email },
            "seller": seller,
            "plantId": plant_id,
            "quantity": quantity,
            "price": price,
            "transactionId": transaction_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order placement should succeed");
}

/// Rewrite an order's placement time to noon UTC of the given day, keyed by
/// its payment transaction
async fn backdate_order(state: &ServerState, transaction_id: &str, date: &str) {
    let at = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis();

    let mut response = state
        .get_db()
        .query("UPDATE order SET created_at = $at WHERE transaction_id = $tx RETURN VALUE created_at")
        .bind(("at", at))
        .bind(("tx", transaction_id.to_string()))
        .await
        .unwrap();

    let stamps: Vec<i64> = response.take(0).unwrap();
    assert_eq!(stamps, vec![at], "backdate must match exactly one order");
}

#[tokio::test]
async fn admin_stat_on_empty_marketplace_returns_zeroes() {
    let (_tmp, state) = test_state().await;

    seed_user(&state, "root@example.com", "The Admin", Some(UserRole::Admin)).await;
    let admin_cookie = login(&state, "root@example.com").await;

    let (status, body) = call(&state, Method::GET, "/api/admin-stat", Some(&admin_cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 1, "only the admin account exists");
    assert_eq!(body["total_plants"], 0);
    assert_eq!(body["total_orders"], 0);
    assert_eq!(body["total_revenue"], 0.0);
    assert_eq!(body["chart_data"], json!([]));
}

#[tokio::test]
async fn admin_stat_buckets_orders_per_calendar_date() {
    let (_tmp, state) = test_state().await;

    let plant_id = seed_listing(&state, "jade@example.com").await;

    seed_user(&state, "charts@example.com", "Chart Buyer", None).await;
    let buyer_cookie = login(&state, "charts@example.com").await;

    // Three orders for the ten-dollar jade, spread over two calendar days
    for (quantity, price, tx) in [
        (1, 10.0, "pi_stat_a"),
        (2, 20.0, "pi_stat_b"),
        (3, 30.0, "pi_stat_c"),
    ] {
        place_order(
            &state,
            &buyer_cookie,
            "charts@example.com",
            &plant_id,
            "jade@example.com",
            quantity,
            price,
            tx,
        )
        .await;
    }
    backdate_order(&state, "pi_stat_a", "2025-03-10").await;
    backdate_order(&state, "pi_stat_b", "2025-03-10").await;
    backdate_order(&state, "pi_stat_c", "2025-03-11").await;

    seed_user(&state, "root@example.com", "The Admin", Some(UserRole::Admin)).await;
    let admin_cookie = login(&state, "root@example.com").await;

    let (status, body) = call(&state, Method::GET, "/api/admin-stat", Some(&admin_cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    // Seller, buyer and admin; one listing; three orders worth 60 in total
    assert_eq!(body["total_users"], 3);
    assert_eq!(body["total_plants"], 1);
    assert_eq!(body["total_orders"], 3);
    assert_eq!(body["total_revenue"], 60.0);

    // One bucket per distinct order date, oldest first, with per-day sums.
    // The dashboard reads the per-day order count from a field named `order`.
    assert_eq!(
        body["chart_data"],
        json!([
            { "date": "2025-03-10", "quantity": 3, "price": 30.0, "order": 2 },
            { "date": "2025-03-11", "quantity": 3, "price": 30.0, "order": 1 }
        ])
    );
}
