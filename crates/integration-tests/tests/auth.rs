//! Account lifecycle against a running server.
//!
//! Requires a migrated database and `delivery-hub-server` listening on
//! `HUB_TEST_BASE_URL`.

use reqwest::StatusCode;
use serde_json::json;

use delivery_hub_integration_tests::{Actor, PASSWORD, expect_json, unique};

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_register_logs_in_and_hides_password() {
    let customer = Actor::register("customer").await;

    assert_eq!(customer.user["role"], "customer");
    assert!(customer.user.get("password").is_none());
    assert!(customer.user.get("passwordHash").is_none());

    let me = expect_json(customer.get("/api/user").await, StatusCode::OK).await;
    assert_eq!(me["id"], customer.user["id"]);
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_login_logout_cycle() {
    let registered = Actor::register("driver").await;
    let username = registered.user["username"].clone();

    let fresh = Actor::anonymous();
    let resp = fresh
        .post("/api/login", &json!({ "username": username, "password": "wrong-password" }))
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(fresh.get("/api/user").await.status(), StatusCode::UNAUTHORIZED);

    let user = expect_json(
        fresh
            .post("/api/login", &json!({ "username": username, "password": PASSWORD }))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(user["role"], "driver");
    assert_eq!(fresh.get("/api/user").await.status(), StatusCode::OK);

    let resp = fresh.post("/api/logout", &json!({})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(fresh.get("/api/user").await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_unknown_username_is_unauthorized() {
    let resp = Actor::anonymous()
        .post(
            "/api/login",
            &json!({ "username": unique("nobody"), "password": PASSWORD }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_duplicate_username_is_server_error() {
    let first = Actor::register("customer").await;
    let username = first.user["username"].as_str().unwrap_or_default().to_owned();

    let resp = Actor::anonymous()
        .post(
            "/api/register",
            &json!({
                "username": username,
                "email": format!("{}@example.com", unique("other")),
                "password": PASSWORD,
                "firstName": "Dup",
                "lastName": "User",
                "role": "customer",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_invalid_email_is_field_error() {
    let body = expect_json(
        Actor::anonymous()
            .post(
                "/api/register",
                &json!({
                    "username": unique("bad-email"),
                    "email": "not-an-email",
                    "password": PASSWORD,
                    "firstName": "Bad",
                    "lastName": "Email",
                    "role": "customer",
                }),
            )
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_admin_routes_need_admin_role() {
    let customer = Actor::register("customer").await;
    assert_eq!(
        customer.get("/api/admin/users").await.status(),
        StatusCode::FORBIDDEN
    );

    let admin = Actor::register("admin").await;
    let users = expect_json(admin.get("/api/admin/users").await, StatusCode::OK).await;
    assert!(
        users
            .as_array()
            .is_some_and(|list| list.iter().any(|u| u["id"] == customer.user["id"]))
    );
}
