//! Integration tests for Delivery Hub.
//!
//! The tests drive a running server over HTTP, one cookie-holding client per
//! simulated user.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate a scratch database and start the server
//! hub-cli migrate
//! cargo run -p delivery-hub-server
//!
//! # Run the ignored integration tests against it
//! HUB_TEST_BASE_URL=http://localhost:5000 cargo test -p delivery-hub-integration-tests -- --ignored
//! ```
//!
//! Every test registers fresh users with random names, so runs never collide.

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Password used for every test account.
pub const PASSWORD: &str = "integration-pass";

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("HUB_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// A short random name with a readable prefix.
#[must_use]
pub fn unique(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", id.get(..12).unwrap_or(&id))
}

/// A client with its own cookie jar, optionally logged in.
pub struct Actor {
    pub client: Client,
    /// The user object returned by registration (`Value::Null` if anonymous).
    pub user: Value,
}

impl Actor {
    /// A client with no session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            client: new_client(),
            user: Value::Null,
        }
    }

    /// Register a fresh user with the given role; the client stays logged in.
    pub async fn register(role: &str) -> Self {
        let client = new_client();
        let username = unique(role);
        let resp = client
            .post(format!("{}/api/register", base_url()))
            .json(&json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": PASSWORD,
                "firstName": "Test",
                "lastName": role,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to register");
        assert_eq!(resp.status(), StatusCode::CREATED, "register {role}");
        let user = resp.json().await.expect("Failed to read user");
        Self { client, user }
    }

    /// This actor's user ID.
    #[must_use]
    pub fn id(&self) -> &str {
        self.user["id"].as_str().expect("user has an id")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{path}", base_url()))
            .json(body)
            .send()
            .await
            .expect("POST failed")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(format!("{}{path}", base_url()))
            .json(body)
            .send()
            .await
            .expect("PUT failed")
    }

    /// Set an order's status and return the response status.
    pub async fn set_order_status(&self, order_id: &str, status: &str) -> StatusCode {
        self.put(
            &format!("/api/orders/{order_id}/status"),
            &json!({ "status": status }),
        )
        .await
        .status()
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Read a JSON body, asserting the expected status first.
pub async fn expect_json(resp: Response, status: StatusCode) -> Value {
    let actual = resp.status();
    let body = resp.text().await.expect("Failed to read body");
    assert_eq!(actual, status, "unexpected status, body: {body}");
    serde_json::from_str(&body).expect("body is JSON")
}

/// A vendor user with an open profile and one menu item.
pub struct VendorFixture {
    pub owner: Actor,
    pub vendor: Value,
    pub item: Value,
}

impl VendorFixture {
    /// Create a vendor with the given delivery fee (decimal string).
    pub async fn new(delivery_fee: &str) -> Self {
        let owner = Actor::register("vendor").await;
        let vendor = expect_json(
            owner
                .post(
                    "/api/vendors",
                    &json!({
                        "name": unique("Kitchen"),
                        "cuisine": "Thai",
                        "address": "1 Test Street",
                        "phone": "555-0100",
                        "deliveryFee": delivery_fee,
                        "deliveryTime": 35,
                    }),
                )
                .await,
            StatusCode::CREATED,
        )
        .await;

        let item = expect_json(
            owner
                .post(
                    "/api/menu-items",
                    &json!({
                        "name": "Pad Thai",
                        "price": "10.00",
                        "category": "Noodles",
                    }),
                )
                .await,
            StatusCode::CREATED,
        )
        .await;

        Self {
            owner,
            vendor,
            item,
        }
    }

    #[must_use]
    pub fn vendor_id(&self) -> &str {
        self.vendor["id"].as_str().expect("vendor has an id")
    }
}

/// Place an order as `customer` and return the created order.
pub async fn place_order(customer: &Actor, vendor_id: &str, items: &Value) -> Value {
    expect_json(
        customer
            .post(
                "/api/orders",
                &json!({
                    "vendorId": vendor_id,
                    "items": items,
                    "deliveryAddress": "9 Delivery Road",
                }),
            )
            .await,
        StatusCode::CREATED,
    )
    .await
}

/// Place a single-line order and return its ID.
pub async fn simple_order(customer: &Actor, fixture: &VendorFixture) -> String {
    let order = place_order(
        customer,
        fixture.vendor_id(),
        &json!([{
            "itemId": fixture.item["id"],
            "name": "Pad Thai",
            "price": "10.00",
            "quantity": 1,
        }]),
    )
    .await;
    order["id"].as_str().expect("order has an id").to_owned()
}
