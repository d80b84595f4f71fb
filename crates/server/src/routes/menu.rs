//! Menu routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use delivery_hub_core::{MenuItemId, VendorId};

use super::{Success, money};
use crate::db::{MenuItemRepository, RepositoryError, VendorRepository};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::RequireVendor;
use crate::models::{MenuItem, NewMenuItem};
use crate::state::AppState;

/// Menu item body. The vendor is always the caller's own profile.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "money"))]
    pub price: Decimal,
    #[validate(length(min = 1, message = "is required"))]
    pub category: String,
    #[validate(url(message = "must be a URL"))]
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

/// Availability toggle body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub is_available: bool,
}

/// `GET /api/vendors/{vendor_id}/menu` - every item, available or not.
pub async fn list_for_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<VendorId>,
) -> Result<Json<Vec<MenuItem>>> {
    let items = MenuItemRepository::new(state.pool())
        .list_for_vendor(vendor_id)
        .await?;
    Ok(Json(items))
}

/// `POST /api/menu-items`
pub async fn create(
    State(state): State<AppState>,
    RequireVendor(user): RequireVendor,
    ValidatedJson(body): ValidatedJson<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let vendor = VendorRepository::new(state.pool())
        .get_by_user_id(user.id)
        .await?
        .ok_or_else(|| AppError::Forbidden("Vendor account required".to_owned()))?;

    let item = MenuItemRepository::new(state.pool())
        .create(&NewMenuItem {
            vendor_id: vendor.id,
            name: body.name,
            description: body.description,
            price: body.price,
            category: body.category,
            image_url: body.image_url,
            is_available: body.is_available.unwrap_or(true),
        })
        .await?;

    tracing::info!(menu_item_id = %item.id, vendor_id = %vendor.id, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/menu-items/{id}/availability`
///
/// Any vendor may toggle any item; ownership is not checked.
pub async fn set_availability(
    State(state): State<AppState>,
    RequireVendor(_user): RequireVendor,
    Path(id): Path<MenuItemId>,
    ValidatedJson(body): ValidatedJson<AvailabilityRequest>,
) -> Result<Json<Success>> {
    MenuItemRepository::new(state.pool())
        .set_available(id, body.is_available)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Menu item not found".to_owned()),
            other => other.into(),
        })?;
    Ok(Json(Success::ok()))
}
