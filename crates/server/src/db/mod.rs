//! Database operations for the marketplace `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Accounts for every role
//! - `vendors` - Restaurant profiles (one per vendor user)
//! - `menu_items` - Items offered by a vendor
//! - `drivers` - Driver profiles (one per driver user)
//! - `orders` - Placed orders with a JSONB snapshot of their line items
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p delivery-hub-cli -- migrate
//! ```
//!
//! Queries are built at runtime with `sqlx::query_as` so the workspace
//! compiles without a live database.

pub mod drivers;
pub mod menu_items;
pub mod orders;
pub mod stats;
pub mod users;
pub mod vendors;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use drivers::DriverRepository;
pub use menu_items::MenuItemRepository;
pub use orders::OrderRepository;
pub use stats::StatsRepository;
pub use users::UserRepository;
pub use vendors::VendorRepository;

/// Errors returned by the repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The row to update does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

/// Turn an UPDATE's affected-row count into `NotFound` when nothing matched.
const fn require_row(rows_affected: u64) -> Result<(), RepositoryError> {
    if rows_affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}
