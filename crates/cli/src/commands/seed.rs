//! Seed the database with demo accounts, vendors, menus and drivers.
//!
//! The seed file is YAML (see `crates/cli/seed/demo.yaml`). Seeding is
//! re-runnable: existing usernames and existing profiles are skipped.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use delivery_hub_core::Role;
use delivery_hub_server::db::{
    DriverRepository, MenuItemRepository, RepositoryError, UserRepository, VendorRepository,
};
use delivery_hub_server::models::{NewDriver, NewMenuItem, NewVendor, User};
use delivery_hub_server::services::auth::{AuthError, AuthService, Registration};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {0}: {1}")]
    Read(String, std::io::Error),

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("User {username} exists with role {actual}, expected {expected}")]
    RoleMismatch {
        username: String,
        expected: Role,
        actual: Role,
    },

    #[error("Account error: {0}")]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Top-level seed document.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    /// Password for every seeded account.
    pub password: String,
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub vendors: Vec<SeedVendor>,
    #[serde(default)]
    pub drivers: Vec<SeedDriver>,
}

#[derive(Debug, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
}

const fn default_role() -> Role {
    Role::Customer
}

#[derive(Debug, Deserialize)]
pub struct SeedVendor {
    /// The owning account; its role is forced to `vendor`.
    pub owner: SeedUser,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: String,
    pub phone: String,
    pub image_url: Option<String>,
    pub delivery_fee: Decimal,
    #[serde(default)]
    pub minimum_order: Decimal,
    pub delivery_time: i32,
    #[serde(default)]
    pub menu: Vec<SeedMenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct SeedMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedDriver {
    /// The owning account; its role is forced to `driver`.
    pub owner: SeedUser,
    pub vehicle_type: String,
    pub license_number: String,
    #[serde(default)]
    pub is_online: bool,
}

/// Parse a seed document.
///
/// # Errors
///
/// Returns `SeedError::Parse` if the YAML does not match the seed schema.
pub fn parse(yaml: &str) -> Result<SeedFile, SeedError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a seed file and apply it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any insert
/// fails.
pub async fn run(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    let yaml = std::fs::read_to_string(path)
        .map_err(|e| SeedError::Read(path.display().to_string(), e))?;
    let seed = parse(&yaml)?;

    let pool = super::connect().await?;
    apply(&pool, &seed).await?;

    info!("Seeding complete!");
    Ok(())
}

async fn apply(pool: &PgPool, seed: &SeedFile) -> Result<(), SeedError> {
    for user in &seed.users {
        ensure_user(pool, user, user.role, &seed.password).await?;
    }

    let vendors = VendorRepository::new(pool);
    let menu = MenuItemRepository::new(pool);
    for entry in &seed.vendors {
        let owner = ensure_user(pool, &entry.owner, Role::Vendor, &seed.password).await?;
        if vendors.get_by_user_id(owner.id).await?.is_some() {
            info!(vendor = %entry.name, "Vendor exists, skipping");
            continue;
        }

        let vendor = vendors
            .create(&NewVendor {
                user_id: owner.id,
                name: entry.name.clone(),
                description: entry.description.clone(),
                cuisine: entry.cuisine.clone(),
                address: entry.address.clone(),
                phone: entry.phone.clone(),
                image_url: entry.image_url.clone(),
                delivery_fee: entry.delivery_fee,
                minimum_order: entry.minimum_order,
                delivery_time: entry.delivery_time,
                is_open: true,
            })
            .await?;

        for item in &entry.menu {
            menu.create(&NewMenuItem {
                vendor_id: vendor.id,
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price,
                category: item.category.clone(),
                image_url: None,
                is_available: true,
            })
            .await?;
        }
        info!(vendor = %vendor.name, items = entry.menu.len(), "Vendor seeded");
    }

    let drivers = DriverRepository::new(pool);
    for entry in &seed.drivers {
        let owner = ensure_user(pool, &entry.owner, Role::Driver, &seed.password).await?;
        if drivers.get_by_user_id(owner.id).await?.is_some() {
            info!(username = %owner.username, "Driver exists, skipping");
            continue;
        }

        drivers
            .create(&NewDriver {
                user_id: owner.id,
                vehicle_type: entry.vehicle_type.clone(),
                license_number: entry.license_number.clone(),
                is_online: entry.is_online,
                current_location_lat: None,
                current_location_lng: None,
            })
            .await?;
        info!(username = %owner.username, "Driver seeded");
    }

    Ok(())
}

async fn ensure_user(
    pool: &PgPool,
    user: &SeedUser,
    role: Role,
    password: &str,
) -> Result<User, SeedError> {
    if let Some(existing) = UserRepository::new(pool).get_by_username(&user.username).await? {
        if existing.role != role {
            return Err(SeedError::RoleMismatch {
                username: user.username.clone(),
                expected: role,
                actual: existing.role,
            });
        }
        return Ok(existing);
    }

    let created = AuthService::new(pool)
        .register(Registration {
            username: user.username.clone(),
            email: user.email.clone(),
            password: password.to_owned(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role,
            phone: user.phone.clone(),
            address: user.address.clone(),
        })
        .await?;
    info!(username = %created.username, role = %created.role, "User seeded");
    Ok(created)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_demo_file_parses() {
        let seed = parse(include_str!("../../seed/demo.yaml")).unwrap();

        assert!(seed.password.len() >= 8);
        assert!(seed.users.iter().any(|u| u.role == Role::Admin));
        assert_eq!(seed.vendors.len(), 2);
        assert_eq!(seed.vendors[0].delivery_fee, Decimal::new(299, 2));
        assert_eq!(seed.vendors[1].minimum_order, Decimal::ZERO);
        assert_eq!(seed.vendors[0].menu[0].price, Decimal::new(1350, 2));
        assert!(seed.drivers[0].is_online);
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let seed = parse(
            r"
password: long-enough
users:
  - username: sam
    email: sam@example.com
    first_name: Sam
    last_name: Lee
",
        )
        .unwrap();
        assert_eq!(seed.users[0].role, Role::Customer);
        assert!(seed.vendors.is_empty());
    }

    #[test]
    fn test_missing_password_is_rejected() {
        assert!(matches!(parse("users: []"), Err(SeedError::Parse(_))));
    }
}
