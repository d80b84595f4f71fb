//! Aggregate counters for the admin dashboard.

use sqlx::PgPool;
use tracing::instrument;

use super::RepositoryError;
use crate::models::PlatformStats;

/// Repository for platform-wide aggregates.
pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    /// Create a new stats repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Compute dashboard counters in a single round trip.
    ///
    /// Revenue sums `total` over all orders regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn platform_stats(&self) -> Result<PlatformStats, RepositoryError> {
        let stats = sqlx::query_as::<_, PlatformStats>(
            r"
            SELECT
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COALESCE(SUM(total), 0) FROM orders) AS total_revenue,
                (SELECT COUNT(*) FROM vendors WHERE is_open) AS active_vendors,
                (SELECT COUNT(*) FROM drivers WHERE is_online) AS active_drivers
            ",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(stats)
    }
}
