//! Read access to orders.
//!
//! Mutations are gated by role alone (see [`crate::OrderStatus::may_be_requested_by`]);
//! reading a single order additionally requires a relationship to it.

use crate::{Role, UserId, VendorId};

/// The caller, as far as order access is concerned.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub user_id: UserId,
    pub role: Role,
    /// The caller's vendor profile, if they have one.
    pub vendor_id: Option<VendorId>,
}

/// The parties attached to an order.
#[derive(Debug, Clone, Copy)]
pub struct OrderParties {
    pub customer_id: UserId,
    pub vendor_id: VendorId,
    pub driver_id: Option<UserId>,
}

/// Whether `viewer` may read an order with the given parties.
///
/// Allowed: the customer who placed it, the driver assigned to it, any
/// admin, and the vendor whose profile received it.
#[must_use]
pub fn can_view_order(viewer: &Viewer, order: &OrderParties) -> bool {
    if viewer.role == Role::Admin {
        return true;
    }
    if order.customer_id == viewer.user_id || order.driver_id == Some(viewer.user_id) {
        return true;
    }
    viewer.role == Role::Vendor && viewer.vendor_id == Some(order.vendor_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        customer: UserId,
        driver: UserId,
        vendor_owner: UserId,
        vendor: VendorId,
        order: OrderParties,
    }

    fn fixture() -> Fixture {
        let customer = UserId::random();
        let driver = UserId::random();
        let vendor = VendorId::random();
        Fixture {
            customer,
            driver,
            vendor_owner: UserId::random(),
            vendor,
            order: OrderParties {
                customer_id: customer,
                vendor_id: vendor,
                driver_id: Some(driver),
            },
        }
    }

    fn viewer(user_id: UserId, role: Role) -> Viewer {
        Viewer {
            user_id,
            role,
            vendor_id: None,
        }
    }

    #[test]
    fn test_placing_customer_can_view() {
        let f = fixture();
        assert!(can_view_order(&viewer(f.customer, Role::Customer), &f.order));
    }

    #[test]
    fn test_assigned_driver_can_view() {
        let f = fixture();
        assert!(can_view_order(&viewer(f.driver, Role::Driver), &f.order));
    }

    #[test]
    fn test_admin_can_view_anything() {
        let f = fixture();
        assert!(can_view_order(&viewer(UserId::random(), Role::Admin), &f.order));
    }

    #[test]
    fn test_owning_vendor_can_view() {
        let f = fixture();
        let owner = Viewer {
            user_id: f.vendor_owner,
            role: Role::Vendor,
            vendor_id: Some(f.vendor),
        };
        assert!(can_view_order(&owner, &f.order));
    }

    #[test]
    fn test_strangers_cannot_view() {
        let f = fixture();

        assert!(!can_view_order(&viewer(UserId::random(), Role::Customer), &f.order));
        assert!(!can_view_order(&viewer(UserId::random(), Role::Driver), &f.order));

        let other_vendor = Viewer {
            user_id: UserId::random(),
            role: Role::Vendor,
            vendor_id: Some(VendorId::random()),
        };
        assert!(!can_view_order(&other_vendor, &f.order));

        let vendor_without_profile = viewer(UserId::random(), Role::Vendor);
        assert!(!can_view_order(&vendor_without_profile, &f.order));
    }

    #[test]
    fn test_unassigned_order_hides_from_drivers() {
        let mut f = fixture();
        f.order.driver_id = None;
        assert!(!can_view_order(&viewer(f.driver, Role::Driver), &f.order));
    }
}
