//! Order placement, visibility, status whitelist and driver claims against a
//! running server.

use reqwest::StatusCode;
use serde_json::{Value, json};

use delivery_hub_integration_tests::{
    Actor, VendorFixture, expect_json, place_order, simple_order,
};

fn contains_order(list: &Value, order_id: &str) -> bool {
    list.as_array()
        .is_some_and(|orders| orders.iter().any(|o| o["id"] == order_id))
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_totals_are_computed_by_the_server() {
    let fixture = VendorFixture::new("3.00").await;
    let customer = Actor::register("customer").await;
    let item_id = &fixture.item["id"];

    let order = place_order(
        &customer,
        fixture.vendor_id(),
        &json!([
            { "itemId": item_id, "name": "Pad Thai", "price": "10.00", "quantity": 2 },
            { "itemId": item_id, "name": "Spring Rolls", "price": "5.00", "quantity": 1 },
        ]),
    )
    .await;

    assert_eq!(order["subtotal"], "25.00");
    assert_eq!(order["deliveryFee"], "3.00");
    assert_eq!(order["tax"], "2.00");
    assert_eq!(order["total"], "30.00");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["customerId"], customer.id());
    assert_eq!(order["estimatedDeliveryTime"], 35);
    assert!(order["driverId"].is_null());
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_client_totals_and_status_are_ignored() {
    let fixture = VendorFixture::new("1.00").await;
    let customer = Actor::register("customer").await;

    let order = expect_json(
        customer
            .post(
                "/api/orders",
                &json!({
                    "vendorId": fixture.vendor_id(),
                    "items": [{ "itemId": fixture.item["id"], "name": "Pad Thai", "price": "10.00", "quantity": 1 }],
                    "deliveryAddress": "9 Delivery Road",
                    "total": "0.01",
                    "status": "delivered",
                }),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(order["total"], "11.80");
    assert_eq!(order["status"], "pending");
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_order_placement_rules() {
    let fixture = VendorFixture::new("1.00").await;
    let customer = Actor::register("customer").await;

    let missing_vendor = customer
        .post(
            "/api/orders",
            &json!({
                "vendorId": "00000000-0000-4000-8000-000000000000",
                "items": [{ "itemId": fixture.item["id"], "name": "x", "price": "1.00", "quantity": 1 }],
                "deliveryAddress": "x",
            }),
        )
        .await;
    assert_eq!(missing_vendor.status(), StatusCode::NOT_FOUND);

    let empty = customer
        .post(
            "/api/orders",
            &json!({ "vendorId": fixture.vendor_id(), "items": [], "deliveryAddress": "x" }),
        )
        .await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let as_vendor = fixture
        .owner
        .post(
            "/api/orders",
            &json!({ "vendorId": fixture.vendor_id(), "items": [], "deliveryAddress": "x" }),
        )
        .await;
    assert_eq!(as_vendor.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_order_visibility() {
    let fixture = VendorFixture::new("2.00").await;
    let customer = Actor::register("customer").await;
    let order_id = simple_order(&customer, &fixture).await;
    let path = format!("/api/orders/{order_id}");

    assert_eq!(customer.get(&path).await.status(), StatusCode::OK);
    assert_eq!(fixture.owner.get(&path).await.status(), StatusCode::OK);
    assert_eq!(
        Actor::register("admin").await.get(&path).await.status(),
        StatusCode::OK
    );

    let stranger = Actor::register("customer").await;
    let body = expect_json(stranger.get(&path).await, StatusCode::FORBIDDEN).await;
    assert_eq!(body["message"], "Access denied");

    let other_vendor = VendorFixture::new("2.00").await;
    assert_eq!(
        other_vendor.owner.get(&path).await.status(),
        StatusCode::FORBIDDEN
    );

    let driver = Actor::register("driver").await;
    assert_eq!(driver.get(&path).await.status(), StatusCode::FORBIDDEN);

    assert_eq!(
        customer
            .get("/api/orders/00000000-0000-4000-8000-000000000000")
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_status_whitelist_per_role() {
    let fixture = VendorFixture::new("2.00").await;
    let customer = Actor::register("customer").await;
    let driver = Actor::register("driver").await;
    let admin = Actor::register("admin").await;
    let order_id = simple_order(&customer, &fixture).await;

    assert_eq!(
        customer.set_order_status(&order_id, "cancelled").await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        fixture.owner.set_order_status(&order_id, "delivered").await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        driver.set_order_status(&order_id, "preparing").await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        fixture.owner.set_order_status(&order_id, "teleported").await,
        StatusCode::BAD_REQUEST
    );

    for status in ["accepted", "preparing", "ready"] {
        assert_eq!(
            fixture.owner.set_order_status(&order_id, status).await,
            StatusCode::OK
        );
    }

    // The whitelist ignores the current status, so a vendor can move a
    // ready order back to `accepted`.
    assert_eq!(
        fixture.owner.set_order_status(&order_id, "accepted").await,
        StatusCode::OK
    );

    assert_eq!(
        admin.set_order_status(&order_id, "cancelled").await,
        StatusCode::OK
    );
    let order = expect_json(customer.get(&format!("/api/orders/{order_id}")).await, StatusCode::OK).await;
    assert_eq!(order["status"], "cancelled");

    assert_eq!(
        admin
            .set_order_status("00000000-0000-4000-8000-000000000000", "cancelled")
            .await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_driver_claims_ready_order() {
    let fixture = VendorFixture::new("2.00").await;
    let customer = Actor::register("customer").await;
    let driver = Actor::register("driver").await;
    let order_id = simple_order(&customer, &fixture).await;

    let available = expect_json(driver.get("/api/available-orders").await, StatusCode::OK).await;
    assert!(!contains_order(&available, &order_id));

    assert_eq!(
        fixture.owner.set_order_status(&order_id, "ready").await,
        StatusCode::OK
    );
    let available = expect_json(driver.get("/api/available-orders").await, StatusCode::OK).await;
    assert!(contains_order(&available, &order_id));

    let resp = driver
        .post(&format!("/api/orders/{order_id}/assign"), &json!({}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let order = expect_json(driver.get(&format!("/api/orders/{order_id}")).await, StatusCode::OK).await;
    assert_eq!(order["status"], "picked_up");
    assert_eq!(order["driverId"], driver.id());

    let available = expect_json(driver.get("/api/available-orders").await, StatusCode::OK).await;
    assert!(!contains_order(&available, &order_id));

    let mine = expect_json(driver.get("/api/my-orders").await, StatusCode::OK).await;
    assert!(contains_order(&mine, &order_id));

    assert_eq!(
        driver.set_order_status(&order_id, "delivered").await,
        StatusCode::OK
    );
}

/// Claims are not exclusive: the second driver silently takes the order.
#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_second_claim_wins() {
    let fixture = VendorFixture::new("2.00").await;
    let customer = Actor::register("customer").await;
    let first = Actor::register("driver").await;
    let second = Actor::register("driver").await;
    let order_id = simple_order(&customer, &fixture).await;
    let assign = format!("/api/orders/{order_id}/assign");

    assert_eq!(first.post(&assign, &json!({})).await.status(), StatusCode::OK);
    assert_eq!(second.post(&assign, &json!({})).await.status(), StatusCode::OK);

    let order = expect_json(customer.get(&format!("/api/orders/{order_id}")).await, StatusCode::OK).await;
    assert_eq!(order["driverId"], second.id());

    assert_eq!(
        first.get(&format!("/api/orders/{order_id}")).await.status(),
        StatusCode::FORBIDDEN
    );

    assert_eq!(
        first
            .post("/api/orders/00000000-0000-4000-8000-000000000000/assign", &json!({}))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_my_orders_by_role() {
    let fixture = VendorFixture::new("2.00").await;
    let customer = Actor::register("customer").await;
    let older = simple_order(&customer, &fixture).await;
    let newer = simple_order(&customer, &fixture).await;

    let mine = expect_json(customer.get("/api/my-orders").await, StatusCode::OK).await;
    assert_eq!(mine[0]["id"], newer);
    assert_eq!(mine[1]["id"], older);

    let vendor_orders = expect_json(fixture.owner.get("/api/my-orders").await, StatusCode::OK).await;
    assert!(contains_order(&vendor_orders, &older));

    let admin = Actor::register("admin").await;
    let admin_mine = expect_json(admin.get("/api/my-orders").await, StatusCode::OK).await;
    assert_eq!(admin_mine, json!([]));

    let all = expect_json(admin.get("/api/admin/orders").await, StatusCode::OK).await;
    assert!(contains_order(&all, &newer));
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_admin_stats_and_drivers() {
    let admin = Actor::register("admin").await;
    let before = expect_json(admin.get("/api/admin/stats").await, StatusCode::OK).await;

    let fixture = VendorFixture::new("2.00").await;
    let customer = Actor::register("customer").await;
    simple_order(&customer, &fixture).await;

    let driver = Actor::register("driver").await;
    let profile = expect_json(
        driver
            .post(
                "/api/drivers",
                &json!({ "vehicleType": "scooter", "licenseNumber": "SC-1", "isOnline": true }),
            )
            .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(profile["userId"], driver.id());
    assert_eq!(profile["rating"], "5.00");

    let after = expect_json(admin.get("/api/admin/stats").await, StatusCode::OK).await;
    let count = |stats: &Value, key: &str| stats[key].as_i64().unwrap_or_default();
    assert!(count(&after, "totalOrders") > count(&before, "totalOrders"));
    assert!(count(&after, "activeVendors") > count(&before, "activeVendors"));
    assert!(count(&after, "activeDrivers") > count(&before, "activeDrivers"));
    assert!(after["totalRevenue"].is_string());

    let online = expect_json(admin.get("/api/admin/drivers").await, StatusCode::OK).await;
    assert!(
        online
            .as_array()
            .is_some_and(|list| list.iter().any(|d| d["id"] == profile["id"]))
    );

    let driver_id = profile["id"].as_str().unwrap_or_default();
    let resp = driver
        .put(
            &format!("/api/drivers/{driver_id}/status"),
            &json!({ "isOnline": false }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running delivery hub server"]
async fn test_out_of_range_money_is_rejected() {
    let fixture = VendorFixture::new("1.00").await;
    let customer = Actor::register("customer").await;
    let order = |price: &str, quantity: u32| {
        json!({
            "vendorId": fixture.vendor_id(),
            "items": [{ "itemId": fixture.item["id"], "name": "Pad Thai", "price": price, "quantity": quantity }],
            "deliveryAddress": "9 Delivery Road",
        })
    };

    let body = expect_json(
        customer
            .post("/api/orders", &order("79228162514264337593543950335", 2))
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["errors"][0]["field"], "items[0].price");

    let resp = customer.post("/api/orders", &order("10000000", 99)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
