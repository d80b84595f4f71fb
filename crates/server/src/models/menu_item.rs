//! Menu items offered by a vendor.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use delivery_hub_core::{MenuItemId, VendorId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub vendor_id: VendorId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub vendor_id: VendorId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub is_available: bool,
}
