//! Vendor (restaurant) profile.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use delivery_hub_core::{UserId, VendorId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    /// The vendor-role user who owns this profile.
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: String,
    pub phone: String,
    pub image_url: Option<String>,
    pub rating: Decimal,
    pub delivery_fee: Decimal,
    pub minimum_order: Decimal,
    /// Estimated delivery time in minutes.
    pub delivery_time: i32,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVendor {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: String,
    pub phone: String,
    pub image_url: Option<String>,
    pub delivery_fee: Decimal,
    pub minimum_order: Decimal,
    pub delivery_time: i32,
    pub is_open: bool,
}
