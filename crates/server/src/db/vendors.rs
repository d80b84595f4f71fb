//! Vendor profile repository.

use sqlx::PgPool;
use tracing::instrument;

use delivery_hub_core::{UserId, VendorId};

use super::{RepositoryError, conflict_on_unique, require_row};
use crate::models::{NewVendor, Vendor};

const VENDOR_COLUMNS: &str = "id, user_id, name, description, cuisine, address, phone, image_url, \
                              rating, delivery_fee, minimum_order, delivery_time, is_open, \
                              created_at";

/// Repository for vendor database operations.
pub struct VendorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VendorRepository<'a> {
    /// Create a new vendor repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a vendor by ID, open or closed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: VendorId) -> Result<Option<Vendor>, RepositoryError> {
        let sql = format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1");
        let vendor = sqlx::query_as::<_, Vendor>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(vendor)
    }

    /// Get the vendor profile owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<Vendor>, RepositoryError> {
        let sql = format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE user_id = $1");
        let vendor = sqlx::query_as::<_, Vendor>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(vendor)
    }

    /// Insert a vendor profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already owns a profile.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, new), fields(user_id = %new.user_id, name = %new.name))]
    pub async fn create(&self, new: &NewVendor) -> Result<Vendor, RepositoryError> {
        let sql = format!(
            "INSERT INTO vendors (user_id, name, description, cuisine, address, phone, image_url, \
                                  delivery_fee, minimum_order, delivery_time, is_open) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {VENDOR_COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&sql)
            .bind(new.user_id)
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.cuisine)
            .bind(&new.address)
            .bind(&new.phone)
            .bind(&new.image_url)
            .bind(new.delivery_fee)
            .bind(new.minimum_order)
            .bind(new.delivery_time)
            .bind(new.is_open)
            .fetch_one(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "vendor profile"))
    }

    /// List vendors that are currently open.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_open(&self) -> Result<Vec<Vendor>, RepositoryError> {
        let sql = format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE is_open ORDER BY name");
        let vendors = sqlx::query_as::<_, Vendor>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(vendors)
    }

    /// Open or close a vendor.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no vendor has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self))]
    pub async fn set_open(&self, id: VendorId, is_open: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE vendors SET is_open = $2 WHERE id = $1")
            .bind(id)
            .bind(is_open)
            .execute(self.pool)
            .await?;
        require_row(result.rows_affected())
    }
}
