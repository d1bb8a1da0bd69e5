//! End-to-end API tests over the mock environment.
//!
//! Drives the router the way a client would: register, login (including
//! the throttle), run the cart quota lifecycle, and check the
//! authorization boundaries.

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};
use stockroom_core::mocks::{
    MockCartStore, MockFailureLedger, MockFavoriteStore, MockInquiryStore, MockPasswordHasher,
    MockStockRepository, MockTokenService, MockUserRepository,
};
use stockroom_web::{AppEnv, api_router};

fn server() -> TestServer {
    let env = AppEnv::new(
        MockUserRepository::new(),
        MockStockRepository::new(),
        MockCartStore::new(),
        MockFavoriteStore::new(),
        MockInquiryStore::new(),
        MockFailureLedger::new(),
        MockTokenService::new(),
        MockPasswordHasher::new(),
    );

    TestServer::new(api_router(env)).expect("failed to start test server")
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header")
}

fn registration(email: &str, is_admin: bool) -> Value {
    json!({
        "name": { "first": "Test", "last": "User" },
        "phone": "0521234567",
        "email": email,
        "password": "passw0rd",
        "address": {
            "country": "IL",
            "city": "Haifa",
            "street": "Main",
            "house_number": 1,
            "zip": 31000
        },
        "is_admin": is_admin
    })
}

async fn register_and_login(server: &TestServer, email: &str, is_admin: bool) -> String {
    let res = server.post("/api/users").json(&registration(email, is_admin)).await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let res = server
        .post("/api/users/login")
        .json(&json!({ "email": email, "password": "passw0rd" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    res.json::<Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

async fn create_stock(server: &TestServer, token: &str, sku: &str) -> String {
    let res = server
        .post("/api/stocks")
        .add_header(header::AUTHORIZATION, bearer(token))
        .json(&json!({
            "brand": "Acme",
            "model": "Widget",
            "quantity": 25,
            "price_usd": "19.99",
            "sku": sku
        }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    res.json::<Value>()["id"].as_str().expect("stock id").to_string()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = server();

    let res = server.get("/health").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.text(), "ok");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = server();

    let res = server.get("/api/definitely-not-a-route").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_login_and_fetch_profile() {
    let server = server();
    let token = register_and_login(&server, "profile@example.com", false).await;
    assert!(!token.is_empty());

    // Registration response never includes the password hash.
    let res = server.post("/api/users").json(&registration("other@example.com", false)).await;
    let body = res.json::<Value>();
    assert!(body.get("password_hash").is_none());

    let id = body["id"].as_str().expect("user id");
    let res = server.get(&format!("/api/users/{id}")).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>()["email"], "other@example.com");
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let server = server();
    register_and_login(&server, "dup@example.com", false).await;

    let res = server.post("/api/users").json(&registration("dup@example.com", false)).await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_throttles_after_three_failures() {
    let server = server();
    register_and_login(&server, "throttle@example.com", false).await;

    for _ in 0..3 {
        let res = server
            .post("/api/users/login")
            .json(&json!({ "email": "throttle@example.com", "password": "wrongpass1" }))
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    }

    // Correct password, but the window is saturated.
    let res = server
        .post("/api/users/login")
        .json(&json!({ "email": "throttle@example.com", "password": "passw0rd" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(res.json::<Value>()["code"], "THROTTLED");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let server = server();

    let res = server.get("/api/cart").await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);

    let res = server
        .get("/api/cart")
        .add_header(header::AUTHORIZATION, bearer("garbage"))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quota_lifecycle_over_http() {
    let server = server();
    let admin = register_and_login(&server, "admin@example.com", true).await;
    let user = register_and_login(&server, "user@example.com", false).await;

    let stock_id = create_stock(&server, &admin, "QL-1").await;

    // Request, then supersede with a smaller ask.
    let res = server
        .post(&format!("/api/cart/{stock_id}/request-quota"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .json(&json!({ "amount": 5 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let res = server
        .post(&format!("/api/cart/{stock_id}/request-quota"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .json(&json!({ "amount": 2 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let entry = res.json::<Value>();
    let entry_id = entry["id"].as_str().expect("entry id").to_string();
    assert_eq!(entry["quota"]["status"], "pending");
    assert_eq!(entry["quota"]["amount"], 2);

    // The cart shows the pending request.
    let res = server
        .get("/api/cart")
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    let items = res.json::<Vec<Value>>();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quota"]["status"], "pending");

    // A non-admin cannot decide.
    let res = server
        .patch(&format!("/api/cart/{entry_id}/quota-status"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .json(&json!({ "status": "approved" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::FORBIDDEN);

    // The admin approves, then fulfills.
    let res = server
        .patch(&format!("/api/cart/{entry_id}/quota-status"))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "status": "approved" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>()["quota"]["handled"], false);

    let res = server
        .patch(&format!("/api/cart/{stock_id}/mark-handled"))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>()["quota"]["handled"], true);

    // Nothing left to fulfill.
    let res = server
        .patch(&format!("/api/cart/{stock_id}/mark-handled"))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_the_cart_entry_discards_quota_state() {
    let server = server();
    let admin = register_and_login(&server, "admin2@example.com", true).await;
    let user = register_and_login(&server, "user2@example.com", false).await;

    let stock_id = create_stock(&server, &admin, "DEL-9").await;

    let res = server
        .post(&format!("/api/cart/{stock_id}/request-quota"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .json(&json!({ "amount": 3 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    // Toggle the item out of the cart; the request goes with it.
    let res = server
        .patch(&format!("/api/cart/{stock_id}"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>()["in_cart"], false);

    let res = server
        .get("/api/cart")
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    assert!(res.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn admin_overview_requires_the_role() {
    let server = server();
    let admin = register_and_login(&server, "admin3@example.com", true).await;
    let user = register_and_login(&server, "user3@example.com", false).await;

    let res = server
        .get("/api/cart/all")
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    assert_eq!(res.status_code(), StatusCode::FORBIDDEN);

    let res = server
        .get("/api/cart/all")
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn favorites_toggle_round_trip() {
    let server = server();
    let user = register_and_login(&server, "fav@example.com", false).await;
    let stock_id = create_stock(&server, &user, "FAV-1").await;

    let res = server
        .patch(&format!("/api/favorites/{stock_id}"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    assert_eq!(res.json::<Value>()["is_favorite"], true);

    let res = server
        .get("/api/favorites")
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    assert_eq!(res.json::<Vec<Value>>().len(), 1);

    let res = server
        .patch(&format!("/api/favorites/{stock_id}"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    assert_eq!(res.json::<Value>()["is_favorite"], false);
}

#[tokio::test]
async fn inquiries_are_public_and_validated() {
    let server = server();

    let res = server
        .post("/api/inquiries")
        .json(&json!({ "name": "Dana", "email": "dana@example.com", "message": "Do you ship abroad?" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);

    let res = server
        .post("/api/inquiries")
        .json(&json!({ "name": "", "email": "dana@example.com", "message": "hi" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

    let res = server.get("/api/inquiries").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Vec<Value>>().len(), 1);
}

#[tokio::test]
async fn stock_sku_validation_applies_on_create() {
    let server = server();
    let user = register_and_login(&server, "sku@example.com", false).await;

    let res = server
        .post("/api/stocks")
        .add_header(header::AUTHORIZATION, bearer(&user))
        .json(&json!({ "brand": "Acme", "sku": "bad sku!" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

    let res = server
        .post("/api/stocks")
        .add_header(header::AUTHORIZATION, bearer(&user))
        .json(&json!({}))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}
