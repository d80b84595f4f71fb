//! Order routes: placement, viewing, status changes, driver claims.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use delivery_hub_core::policy::{Viewer, can_view_order};
use delivery_hub_core::{
    LineItem, MAX_AMOUNT, MenuItemId, OrderId, OrderStatus, OrderTotals, Role, VendorId,
};

use super::{Success, money};
use crate::db::{OrderRepository, RepositoryError, VendorRepository};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::{RequireAuth, RequireCustomer, RequireDriver};
use crate::models::{CurrentUser, NewOrder, Order};
use crate::state::AppState;

/// One line of a new order, as the customer saw it on the menu.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub item_id: MenuItemId,
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(custom(function = "money"))]
    pub price: Decimal,
    #[validate(range(min = 1, max = 99, message = "must be 1-99"))]
    pub quantity: u32,
}

impl From<LineItemRequest> for LineItem {
    fn from(line: LineItemRequest) -> Self {
        Self {
            item_id: line.item_id,
            name: line.name,
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// Order placement body. Totals are always computed here; any client
/// totals in the body are ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub vendor_id: VendorId,
    #[validate(length(min = 1, message = "must contain at least one item"), nested)]
    pub items: Vec<LineItemRequest>,
    #[validate(length(min = 1, message = "is required"))]
    pub delivery_address: String,
    pub customer_notes: Option<String>,
}

/// Status change body. Unknown statuses fail deserialization (400).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// `POST /api/orders`
pub async fn place(
    State(state): State<AppState>,
    RequireCustomer(user): RequireCustomer,
    ValidatedJson(body): ValidatedJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let vendor = VendorRepository::new(state.pool())
        .get(body.vendor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_owned()))?;

    let items: Vec<LineItem> = body.items.into_iter().map(LineItem::from).collect();
    let totals = order_totals(&items, vendor.delivery_fee)?;

    let order = OrderRepository::new(state.pool())
        .create(&NewOrder {
            customer_id: user.id,
            vendor_id: vendor.id,
            items,
            totals,
            delivery_address: body.delivery_address,
            customer_notes: body.customer_notes.filter(|notes| !notes.trim().is_empty()),
            estimated_delivery_time: Some(vendor.delivery_time),
        })
        .await?;

    tracing::info!(
        order_id = %order.id,
        customer_id = %user.id,
        vendor_id = %vendor.id,
        total = %order.total,
        "Order placed"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders/{id}`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = find_order(&state, id).await?;

    let viewer = viewer_for(&state, &user).await?;
    if !can_view_order(&viewer, &order.parties()) {
        return Err(AppError::Forbidden("Access denied".to_owned()));
    }

    Ok(Json(order))
}

/// `GET /api/my-orders` - newest first.
///
/// Customers get what they placed, drivers what they hold, vendors what
/// their profile received. Admins use `/api/admin/orders` and get nothing here.
pub async fn mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool());
    let list = match user.role {
        Role::Customer => orders.list_for_customer(user.id).await?,
        Role::Driver => orders.list_for_driver(user.id).await?,
        Role::Vendor => match VendorRepository::new(state.pool())
            .get_by_user_id(user.id)
            .await?
        {
            Some(vendor) => orders.list_for_vendor(vendor.id).await?,
            None => Vec::new(),
        },
        Role::Admin => Vec::new(),
    };
    Ok(Json(list))
}

/// `PUT /api/orders/{id}/status`
///
/// The caller's role decides which target statuses are allowed; the order's
/// current status is not consulted.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
    ValidatedJson(body): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<Success>> {
    let order = find_order(&state, id).await?;

    if !body.status.may_be_requested_by(user.role) {
        return Err(AppError::Forbidden("Cannot update order status".to_owned()));
    }

    OrderRepository::new(state.pool())
        .update_status(id, body.status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Order not found".to_owned()),
            other => other.into(),
        })?;

    tracing::info!(
        order_id = %id,
        by = %user.id,
        role = %user.role,
        from = %order.status,
        to = %body.status,
        terminal = body.status.is_terminal(),
        "Order status changed"
    );
    Ok(Json(Success::ok()))
}

/// `GET /api/available-orders` - ready orders, oldest first.
pub async fn available(
    State(state): State<AppState>,
    RequireDriver(_user): RequireDriver,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_available().await?;
    Ok(Json(orders))
}

/// `POST /api/orders/{id}/assign` - claim an order for the calling driver.
///
/// Claims are not exclusive: a later claim replaces an earlier one.
pub async fn assign(
    State(state): State<AppState>,
    RequireDriver(user): RequireDriver,
    Path(id): Path<OrderId>,
) -> Result<Json<Success>> {
    let assignment = OrderRepository::new(state.pool())
        .assign_driver(id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    if let Some(previous) = assignment.displaced() {
        tracing::warn!(
            order_id = %id,
            previous_driver = %previous,
            driver = %user.id,
            "Order reassigned to a different driver"
        );
    } else {
        tracing::info!(order_id = %id, driver = %user.id, "Order assigned");
    }

    Ok(Json(Success::ok()))
}

fn order_totals(items: &[LineItem], delivery_fee: Decimal) -> Result<OrderTotals> {
    OrderTotals::compute(items, delivery_fee).map_err(|_| {
        AppError::BadRequest(format!("Order total exceeds the maximum of {MAX_AMOUNT}"))
    })
}

async fn find_order(state: &AppState, id: OrderId) -> Result<Order> {
    OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))
}

async fn viewer_for(state: &AppState, user: &CurrentUser) -> Result<Viewer> {
    let vendor_id = if user.role == Role::Vendor {
        VendorRepository::new(state.pool())
            .get_by_user_id(user.id)
            .await?
            .map(|vendor| vendor.id)
    } else {
        None
    };

    Ok(Viewer {
        user_id: user.id,
        role: user.role,
        vendor_id,
    })
}
