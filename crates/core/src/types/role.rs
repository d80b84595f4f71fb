//! Marketplace roles.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the four roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// The role a user registered with. Fixed for the lifetime of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses vendors and places orders.
    Customer,
    /// Claims ready orders and delivers them.
    Driver,
    /// Owns a restaurant profile, its menu, and fulfils its orders.
    Vendor,
    /// Observes the whole platform.
    Admin,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Customer, Self::Driver, Self::Vendor, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Driver => "driver",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RoleParseError(s.to_owned()))
    }
}

text_enum_sqlx!(Role);
