use bazaar_api::{build_router, AppState};
use bazaar_db::{seed_default_catalog, Database, DbConfig};
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod on a fresh in-memory database with the default
    /// catalog, bound to an ephemeral port.
    async fn spawn() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_default_catalog(&db).await.unwrap();
        Self::spawn_with(db).await
    }

    async fn spawn_with(db: Database) -> Self {
        let state = AppState::load(db).await.unwrap();
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn register(&self, username: &str) -> i64 {
        let (status, body) = self
            .post(
                "/register",
                json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "password123",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn add_to_cart(&self, user_id: i64, product_id: i64, quantity: i64) -> (StatusCode, Value) {
        self.post(
            "/cart",
            json!({ "user_id": user_id, "product_id": product_id, "quantity": quantity }),
        )
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn root_and_health() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to our E-commerce API");

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn health_reports_closed_database() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let server = TestServer::spawn_with(db.clone()).await;
    db.close().await;

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unreachable");
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .get(server.url("/"))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");

    let res = server.client.get(server.url("/")).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn list_and_get_products() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 6);
    assert_eq!(products[0]["name"], "Smartphone");

    let (status, body) = server.get("/products/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], "699.99");
    assert_eq!(body["price_cents"], 69999);
    assert_eq!(body["stock"], 15);
}

#[tokio::test]
async fn get_product_errors() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/products/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Product not found: 42");

    let (status, body) = server.get("/products/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn register_and_login() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post(
            "/register",
            json!({ "username": "alice", "email": "alice@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert!(body.get("password_hash").is_none());
    let id = body["id"].as_i64().unwrap();

    let (status, body) = server
        .post("/login", json!({ "email": "alice@example.com", "password": "password123" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user_id"], id);

    let (status, body) = server
        .post("/login", json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn register_rejects_duplicates_and_bad_input() {
    let server = TestServer::spawn().await;
    server.register("alice").await;

    let (status, body) = server
        .post(
            "/register",
            json!({ "username": "alice", "email": "other@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already registered");

    let (status, body) = server
        .post(
            "/register",
            json!({ "username": "alice2", "email": "alice@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");

    let (status, body) = server
        .post(
            "/register",
            json!({ "username": "bob", "email": "not-an-email", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = server
        .post(
            "/register",
            json!({ "username": "bob", "email": "bob@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Cart & Checkout
// =============================================================================

#[tokio::test]
async fn add_merges_and_checkout_totals() {
    let server = TestServer::spawn().await;
    let user = server.register("alice").await;

    let (status, body) = server.add_to_cart(user, 1, 5).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Added 5 of product 1 to cart for user {}", user)
    );

    let (status, body) = server.add_to_cart(user, 1, 3).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["line_quantity"], 8);

    let (status, body) = server.get(&format!("/cart/{}", user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "product_id": 1, "quantity": 8 }]));

    let (status, body) = server.post(&format!("/checkout/{}", user), json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price_cents"], 559992);
    assert_eq!(body["total_price"], "5599.92");
    assert_eq!(body["cart_items"].as_array().unwrap().len(), 1);

    // Checkout leaves the cart in place.
    let (status, _) = server.get(&format!("/cart/{}", user)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cart_keeps_first_insertion_order() {
    let server = TestServer::spawn().await;
    let user = server.register("alice").await;

    server.add_to_cart(user, 3, 1).await;
    server.add_to_cart(user, 1, 1).await;
    server.add_to_cart(user, 3, 2).await;

    let (_, body) = server.get(&format!("/cart/{}", user)).await;
    assert_eq!(
        body,
        json!([
            { "product_id": 3, "quantity": 3 },
            { "product_id": 1, "quantity": 1 },
        ])
    );

    let (_, body) = server.post(&format!("/checkout/{}", user), json!(null)).await;
    assert_eq!(body["total_price_cents"], 3 * 19950 + 69999);
}

#[tokio::test]
async fn insufficient_stock_leaves_no_cart() {
    let server = TestServer::spawn().await;
    let user = server.register("alice").await;

    let (status, body) = server.add_to_cart(user, 6, 2).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    assert!(body["message"].as_str().unwrap().contains("'jeans'"));

    let (status, body) = server.get(&format!("/cart/{}", user)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unknown_entities_are_not_found() {
    let server = TestServer::spawn().await;
    let user = server.register("alice").await;

    let (status, _) = server.add_to_cart(99, 1, 1).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.add_to_cart(user, 42, 1).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.get("/cart/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server.post("/checkout/99", json!(null)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn add_to_cart_validation() {
    let server = TestServer::spawn().await;
    let user = server.register("alice").await;

    let (status, body) = server.add_to_cart(user, 1, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = server.add_to_cart(user, 1, -3).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .post("/cart", json!({ "user_id": user, "product_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_user_ids_are_rejected() {
    let server = TestServer::spawn().await;

    for path in ["/cart/0", "/cart/-4"] {
        let (status, body) = server.get(path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    for path in ["/checkout/0", "/checkout/-4"] {
        let (status, body) = server.post(path, json!(null)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn carts_are_per_user() {
    let server = TestServer::spawn().await;
    let alice = server.register("alice").await;
    let bob = server.register("bob").await;

    server.add_to_cart(alice, 2, 1).await;

    let (status, _) = server.get(&format!("/cart/{}", bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = server.post(&format!("/checkout/{}", alice), json!(null)).await;
    assert_eq!(body["total_price"], "1200.00");
}
