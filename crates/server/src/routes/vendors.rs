//! Vendor profile routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use delivery_hub_core::VendorId;

use super::{Success, money};
use crate::db::{RepositoryError, VendorRepository};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::RequireVendor;
use crate::models::{NewVendor, Vendor};
use crate::state::AppState;

/// Vendor profile body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendorRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "is required"))]
    pub cuisine: String,
    #[validate(length(min = 1, message = "is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "is required"))]
    pub phone: String,
    #[validate(url(message = "must be a URL"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "money"))]
    pub delivery_fee: Decimal,
    #[serde(default)]
    #[validate(custom(function = "money"))]
    pub minimum_order: Decimal,
    #[validate(range(min = 1, max = 600, message = "must be 1-600 minutes"))]
    pub delivery_time: i32,
    pub is_open: Option<bool>,
}

/// Open/closed toggle body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VendorStatusRequest {
    pub is_open: bool,
}

/// `GET /api/vendors` - open vendors only.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Vendor>>> {
    let vendors = VendorRepository::new(state.pool()).list_open().await?;
    Ok(Json(vendors))
}

/// `GET /api/vendors/me` - the caller's own profile.
pub async fn mine(
    State(state): State<AppState>,
    RequireVendor(user): RequireVendor,
) -> Result<Json<Vendor>> {
    VendorRepository::new(state.pool())
        .get_by_user_id(user.id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Vendor profile not found".to_owned()))
}

/// `GET /api/vendors/{id}` - open or closed.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<VendorId>,
) -> Result<Json<Vendor>> {
    VendorRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_owned()))
}

/// `POST /api/vendors` - create the caller's profile.
pub async fn create(
    State(state): State<AppState>,
    RequireVendor(user): RequireVendor,
    ValidatedJson(body): ValidatedJson<CreateVendorRequest>,
) -> Result<(StatusCode, Json<Vendor>)> {
    let vendors = VendorRepository::new(state.pool());
    if vendors.get_by_user_id(user.id).await?.is_some() {
        return Err(AppError::BadRequest("Vendor profile already exists".to_owned()));
    }

    let vendor = vendors
        .create(&NewVendor {
            user_id: user.id,
            name: body.name,
            description: body.description,
            cuisine: body.cuisine,
            address: body.address,
            phone: body.phone,
            image_url: body.image_url,
            delivery_fee: body.delivery_fee,
            minimum_order: body.minimum_order,
            delivery_time: body.delivery_time,
            is_open: body.is_open.unwrap_or(true),
        })
        .await?;

    tracing::info!(vendor_id = %vendor.id, user_id = %user.id, "Vendor profile created");
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// `PUT /api/vendors/{id}/status`
///
/// Any vendor may toggle any vendor; ownership is not checked.
pub async fn set_status(
    State(state): State<AppState>,
    RequireVendor(user): RequireVendor,
    Path(id): Path<VendorId>,
    ValidatedJson(body): ValidatedJson<VendorStatusRequest>,
) -> Result<Json<Success>> {
    VendorRepository::new(state.pool())
        .set_open(id, body.is_open)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Vendor not found".to_owned()),
            other => other.into(),
        })?;

    tracing::info!(vendor_id = %id, by = %user.id, is_open = body.is_open, "Vendor status changed");
    Ok(Json(Success::ok()))
}
