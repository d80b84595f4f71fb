//! Driver profile repository.

use sqlx::PgPool;
use tracing::instrument;

use delivery_hub_core::{DriverId, UserId};

use super::{RepositoryError, conflict_on_unique, require_row};
use crate::models::{Driver, NewDriver};

const DRIVER_COLUMNS: &str = "id, user_id, vehicle_type, license_number, rating, is_online, \
                              current_location_lat, current_location_lng, total_deliveries, \
                              created_at";

/// Repository for driver database operations.
pub struct DriverRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DriverRepository<'a> {
    /// Create a new driver repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a driver profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: DriverId) -> Result<Option<Driver>, RepositoryError> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = $1");
        let driver = sqlx::query_as::<_, Driver>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(driver)
    }

    /// Get the driver profile owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<Driver>, RepositoryError> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE user_id = $1");
        let driver = sqlx::query_as::<_, Driver>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(driver)
    }

    /// Insert a driver profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already owns a profile.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, new), fields(user_id = %new.user_id))]
    pub async fn create(&self, new: &NewDriver) -> Result<Driver, RepositoryError> {
        let sql = format!(
            "INSERT INTO drivers (user_id, vehicle_type, license_number, is_online, \
                                  current_location_lat, current_location_lng) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {DRIVER_COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&sql)
            .bind(new.user_id)
            .bind(&new.vehicle_type)
            .bind(&new.license_number)
            .bind(new.is_online)
            .bind(new.current_location_lat)
            .bind(new.current_location_lng)
            .fetch_one(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "driver profile"))
    }

    /// List drivers that are currently online.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_online(&self) -> Result<Vec<Driver>, RepositoryError> {
        let sql = format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE is_online ORDER BY created_at"
        );
        let drivers = sqlx::query_as::<_, Driver>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(drivers)
    }

    /// Put a driver online or offline.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no driver has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self))]
    pub async fn set_online(&self, id: DriverId, is_online: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE drivers SET is_online = $2 WHERE id = $1")
            .bind(id)
            .bind(is_online)
            .execute(self.pool)
            .await?;
        require_row(result.rows_affected())
    }
}
