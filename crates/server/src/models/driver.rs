//! Driver profile.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use delivery_hub_core::{DriverId, UserId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: DriverId,
    pub user_id: UserId,
    pub vehicle_type: String,
    pub license_number: String,
    pub rating: Decimal,
    pub is_online: bool,
    pub current_location_lat: Option<Decimal>,
    pub current_location_lng: Option<Decimal>,
    pub total_deliveries: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub user_id: UserId,
    pub vehicle_type: String,
    pub license_number: String,
    pub is_online: bool,
    pub current_location_lat: Option<Decimal>,
    pub current_location_lng: Option<Decimal>,
}
