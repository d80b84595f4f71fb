//! Orders and driver assignment results.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use delivery_hub_core::policy::OrderParties;
use delivery_hub_core::{LineItem, OrderId, OrderStatus, OrderTotals, UserId, VendorId};

/// A placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub vendor_id: VendorId,
    /// The assigned driver's *user* id.
    pub driver_id: Option<UserId>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub customer_notes: Option<String>,
    /// Minutes, copied from the vendor when the order was placed.
    pub estimated_delivery_time: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    #[must_use]
    pub const fn parties(&self) -> OrderParties {
        OrderParties {
            customer_id: self.customer_id,
            vendor_id: self.vendor_id,
            driver_id: self.driver_id,
        }
    }
}

/// Fields needed to insert an order. Status always starts at `pending`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: UserId,
    pub vendor_id: VendorId,
    pub items: Vec<LineItem>,
    pub totals: OrderTotals,
    pub delivery_address: String,
    pub customer_notes: Option<String>,
    pub estimated_delivery_time: Option<i32>,
}

/// Result of claiming an order.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub order: Order,
    /// Driver who held the order before this claim, if any.
    pub previous_driver: Option<UserId>,
}

impl Assignment {
    /// Whether the claim replaced a different driver.
    #[must_use]
    pub fn displaced(&self) -> Option<UserId> {
        self.previous_driver
            .filter(|previous| Some(*previous) != self.order.driver_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order(driver_id: Option<UserId>) -> Order {
        let totals = OrderTotals::compute(&[], Decimal::new(299, 2)).unwrap();
        Order {
            id: OrderId::random(),
            customer_id: UserId::random(),
            vendor_id: VendorId::random(),
            driver_id,
            items: Vec::new(),
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery_fee,
            tax: totals.tax,
            total: totals.total,
            status: OrderStatus::PickedUp,
            delivery_address: "1 Main St".to_owned(),
            customer_notes: None,
            estimated_delivery_time: Some(30),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_displaced_driver() {
        let first = UserId::random();
        let second = UserId::random();

        let fresh = Assignment {
            order: order(Some(first)),
            previous_driver: None,
        };
        assert_eq!(fresh.displaced(), None);

        let reclaim = Assignment {
            order: order(Some(first)),
            previous_driver: Some(first),
        };
        assert_eq!(reclaim.displaced(), None);

        let stolen = Assignment {
            order: order(Some(second)),
            previous_driver: Some(first),
        };
        assert_eq!(stolen.displaced(), Some(first));
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let json = serde_json::to_value(order(None)).unwrap();
        assert_eq!(json["status"], "picked_up");
        assert_eq!(json["deliveryFee"], "2.99");
        assert!(json["driverId"].is_null());
        assert_eq!(json["estimatedDeliveryTime"], 30);
    }
}
