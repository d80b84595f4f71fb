//! Menu item repository.

use sqlx::PgPool;
use tracing::instrument;

use delivery_hub_core::{MenuItemId, VendorId};

use super::{RepositoryError, require_row};
use crate::models::{MenuItem, NewMenuItem};

const MENU_ITEM_COLUMNS: &str = "id, vendor_id, name, description, price, category, image_url, \
                                 is_available, created_at";

/// Repository for menu item database operations.
pub struct MenuItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuItemRepository<'a> {
    /// Create a new menu item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every item on a vendor's menu, available or not.
    ///
    /// An unknown vendor yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_vendor(
        &self,
        vendor_id: VendorId,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let sql = format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items \
             WHERE vendor_id = $1 ORDER BY category, name"
        );
        let items = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(vendor_id)
            .fetch_all(self.pool)
            .await?;
        Ok(items)
    }

    /// Get a menu item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let sql = format!("SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1");
        let item = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(item)
    }

    /// Insert a menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, new), fields(vendor_id = %new.vendor_id, name = %new.name))]
    pub async fn create(&self, new: &NewMenuItem) -> Result<MenuItem, RepositoryError> {
        let sql = format!(
            "INSERT INTO menu_items (vendor_id, name, description, price, category, image_url, \
                                     is_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {MENU_ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(new.vendor_id)
            .bind(&new.name)
            .bind(&new.description)
            .bind(new.price)
            .bind(&new.category)
            .bind(&new.image_url)
            .bind(new.is_available)
            .fetch_one(self.pool)
            .await?;
        Ok(item)
    }

    /// Mark an item available or unavailable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self))]
    pub async fn set_available(
        &self,
        id: MenuItemId,
        is_available: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE menu_items SET is_available = $2 WHERE id = $1")
            .bind(id)
            .bind(is_available)
            .execute(self.pool)
            .await?;
        require_row(result.rows_affected())
    }
}
