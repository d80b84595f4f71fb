//! Platform-wide counters for the admin dashboard.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    /// Orders in any status.
    pub total_orders: i64,
    /// Sum of order totals in any status, zero when there are no orders.
    pub total_revenue: Decimal,
    /// Vendors currently open.
    pub active_vendors: i64,
    /// Drivers currently online.
    pub active_drivers: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_dashboard_keys() {
        let stats = PlatformStats {
            total_orders: 3,
            total_revenue: Decimal::new(4550, 2),
            active_vendors: 2,
            active_drivers: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalOrders": 3,
                "totalRevenue": "45.50",
                "activeVendors": 2,
                "activeDrivers": 0
            })
        );
    }
}
