//! Order lifecycle status and the per-role request whitelist.
//!
//! ```text
//! pending -> accepted -> preparing -> ready -> picked_up -> delivered
//!                          (cancelled is terminal, reachable from anywhere)
//! ```
//!
//! The whitelist in [`OrderStatus::may_be_requested_by`] only says which
//! target statuses a role may *ask for*. It never looks at the order's
//! current status, so a vendor can move a delivered order back to
//! `preparing`. Callers that want monotonic progression must add it.

use serde::{Deserialize, Serialize};

use super::Role;

/// Error returned when a string is not one of the seven statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order status: {0}")]
pub struct StatusParseError(pub String);

/// Fulfilment progress of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Preparing,
    Ready,
    PickedUp,
    Delivered,
    Cancelled,
}

const VENDOR_TARGETS: &[OrderStatus] = &[
    OrderStatus::Accepted,
    OrderStatus::Preparing,
    OrderStatus::Ready,
];
const DRIVER_TARGETS: &[OrderStatus] = &[OrderStatus::PickedUp, OrderStatus::Delivered];

impl OrderStatus {
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Accepted,
        Self::Preparing,
        Self::Ready,
        Self::PickedUp,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::PickedUp => "picked_up",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Target statuses a role may request through the status endpoint.
    ///
    /// Admins may request anything; customers nothing.
    #[must_use]
    pub const fn requestable_by(role: Role) -> &'static [Self] {
        match role {
            Role::Vendor => VENDOR_TARGETS,
            Role::Driver => DRIVER_TARGETS,
            Role::Admin => &Self::ALL,
            Role::Customer => &[],
        }
    }

    /// Whether `role` may request a move to `self`, regardless of the
    /// order's current status.
    #[must_use]
    pub fn may_be_requested_by(self, role: Role) -> bool {
        Self::requestable_by(role).contains(&self)
    }

    /// `delivered` and `cancelled` end the lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusParseError(s.to_owned()))
    }
}

text_enum_sqlx!(OrderStatus);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_for_every_status() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("in_transit".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PickedUp).unwrap(),
            "\"picked_up\""
        );
    }

    #[test]
    fn test_whitelist_table_is_exact() {
        use OrderStatus::*;

        let expected = |role: Role, status: OrderStatus| match role {
            Role::Vendor => matches!(status, Accepted | Preparing | Ready),
            Role::Driver => matches!(status, PickedUp | Delivered),
            Role::Admin => true,
            Role::Customer => false,
        };

        for role in Role::ALL {
            for status in OrderStatus::ALL {
                assert_eq!(
                    status.may_be_requested_by(role),
                    expected(role, status),
                    "{role} -> {status}"
                );
            }
        }
    }

    #[test]
    fn test_nobody_but_admin_may_cancel_or_reset() {
        for role in [Role::Customer, Role::Driver, Role::Vendor] {
            assert!(!OrderStatus::Cancelled.may_be_requested_by(role));
            assert!(!OrderStatus::Pending.may_be_requested_by(role));
        }
        assert!(OrderStatus::Cancelled.may_be_requested_by(Role::Admin));
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![OrderStatus::Delivered, OrderStatus::Cancelled]);
    }
}
