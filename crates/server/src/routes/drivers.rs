//! Driver profile routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use delivery_hub_core::DriverId;

use super::Success;
use crate::db::{DriverRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::RequireDriver;
use crate::models::{Driver, NewDriver};
use crate::state::AppState;

/// Driver profile body. The owner is always the caller.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub vehicle_type: String,
    #[validate(length(min = 1, message = "is required"))]
    pub license_number: String,
    pub is_online: Option<bool>,
    #[validate(custom(function = "latitude"))]
    pub current_location_lat: Option<Decimal>,
    #[validate(custom(function = "longitude"))]
    pub current_location_lng: Option<Decimal>,
}

/// Online/offline toggle body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DriverStatusRequest {
    pub is_online: bool,
}

fn within(
    value: &Decimal,
    bound: i64,
    code: &'static str,
) -> std::result::Result<(), ValidationError> {
    if value.abs() <= Decimal::from(bound) {
        Ok(())
    } else {
        Err(ValidationError::new(code))
    }
}

fn latitude(value: &Decimal) -> std::result::Result<(), ValidationError> {
    within(value, 90, "latitude")
}

fn longitude(value: &Decimal) -> std::result::Result<(), ValidationError> {
    within(value, 180, "longitude")
}

/// `POST /api/drivers`
pub async fn create(
    State(state): State<AppState>,
    RequireDriver(user): RequireDriver,
    ValidatedJson(body): ValidatedJson<CreateDriverRequest>,
) -> Result<(StatusCode, Json<Driver>)> {
    let drivers = DriverRepository::new(state.pool());
    if drivers.get_by_user_id(user.id).await?.is_some() {
        return Err(AppError::BadRequest("Driver profile already exists".to_owned()));
    }

    let driver = drivers
        .create(&NewDriver {
            user_id: user.id,
            vehicle_type: body.vehicle_type,
            license_number: body.license_number,
            is_online: body.is_online.unwrap_or(false),
            current_location_lat: body.current_location_lat,
            current_location_lng: body.current_location_lng,
        })
        .await?;

    tracing::info!(driver_id = %driver.id, user_id = %user.id, "Driver profile created");
    Ok((StatusCode::CREATED, Json(driver)))
}

/// `PUT /api/drivers/{id}/status`
///
/// Any driver may toggle any driver; ownership is not checked.
pub async fn set_status(
    State(state): State<AppState>,
    RequireDriver(user): RequireDriver,
    Path(id): Path<DriverId>,
    ValidatedJson(body): ValidatedJson<DriverStatusRequest>,
) -> Result<Json<Success>> {
    DriverRepository::new(state.pool())
        .set_online(id, body.is_online)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Driver not found".to_owned()),
            other => other.into(),
        })?;

    tracing::info!(driver_id = %id, by = %user.id, is_online = body.is_online, "Driver status changed");
    Ok(Json(Success::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(latitude(&Decimal::new(-9000, 2)).is_ok());
        assert!(latitude(&Decimal::new(9001, 2)).is_err());
        assert!(longitude(&Decimal::new(17999, 2)).is_ok());
        assert!(longitude(&Decimal::new(-18001, 2)).is_err());
    }
}
