//! Order repository.
//!
//! Line items are stored as a JSONB snapshot so later menu edits never
//! rewrite history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use delivery_hub_core::{LineItem, OrderId, OrderStatus, UserId, VendorId};

use super::{RepositoryError, require_row};
use crate::models::{Assignment, NewOrder, Order};

const ORDER_COLUMNS: &str = "id, customer_id, vendor_id, driver_id, items, subtotal, delivery_fee, \
                             tax, total, status, delivery_address, customer_notes, \
                             estimated_delivery_time, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    customer_id: UserId,
    vendor_id: VendorId,
    driver_id: Option<UserId>,
    items: Json<Vec<LineItem>>,
    subtotal: Decimal,
    delivery_fee: Decimal,
    tax: Decimal,
    total: Decimal,
    status: OrderStatus,
    delivery_address: String,
    customer_notes: Option<String>,
    estimated_delivery_time: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            vendor_id: row.vendor_id,
            driver_id: row.driver_id,
            items: row.items.0,
            subtotal: row.subtotal,
            delivery_fee: row.delivery_fee,
            tax: row.tax,
            total: row.total,
            status: row.status,
            delivery_address: row.delivery_address,
            customer_notes: row.customer_notes,
            estimated_delivery_time: row.estimated_delivery_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    #[sqlx(flatten)]
    order: OrderRow,
    previous_driver_id: Option<UserId>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order in `pending` status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, new), fields(customer_id = %new.customer_id, vendor_id = %new.vendor_id))]
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let sql = format!(
            "INSERT INTO orders (customer_id, vendor_id, items, subtotal, delivery_fee, tax, \
                                 total, status, delivery_address, customer_notes, \
                                 estimated_delivery_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(new.customer_id)
            .bind(new.vendor_id)
            .bind(Json(&new.items))
            .bind(new.totals.subtotal)
            .bind(new.totals.delivery_fee)
            .bind(new.totals.tax)
            .bind(new.totals.total)
            .bind(OrderStatus::Pending)
            .bind(&new.delivery_address)
            .bind(&new.customer_notes)
            .bind(new.estimated_delivery_time)
            .fetch_one(self.pool)
            .await?;
        Ok(row.into())
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Order::from))
    }

    /// Orders placed by a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_customer(&self, customer_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        self.list_where("customer_id = $1", customer_id.as_uuid()).await
    }

    /// Orders received by a vendor, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_vendor(&self, vendor_id: VendorId) -> Result<Vec<Order>, RepositoryError> {
        self.list_where("vendor_id = $1", vendor_id.as_uuid()).await
    }

    /// Orders assigned to a driver (by user id), newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_driver(&self, driver_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        self.list_where("driver_id = $1", driver_id.as_uuid()).await
    }

    /// Orders in `ready` status, oldest first.
    ///
    /// An order stays in this list only until someone claims it, since
    /// claiming moves it to `picked_up`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_available(&self) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE status = $1 ORDER BY created_at");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(OrderStatus::Ready)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Set an order's status and bump `updated_at`.
    ///
    /// The current status is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(self.pool)
                .await?;
        require_row(result.rows_affected())
    }

    /// Attach a driver to an order and move it to `picked_up`.
    ///
    /// Neither the order's status nor an existing assignment is checked:
    /// a second claim overwrites the first. The previous driver is returned
    /// so callers can log the takeover. Returns `None` for an unknown order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self))]
    pub async fn assign_driver(
        &self,
        id: OrderId,
        driver_id: UserId,
    ) -> Result<Option<Assignment>, RepositoryError> {
        let sql = format!(
            "WITH prev AS ( \
                 SELECT id AS prev_id, driver_id AS previous_driver_id \
                 FROM orders WHERE id = $1 FOR UPDATE \
             ) \
             UPDATE orders \
             SET driver_id = $2, status = $3, updated_at = NOW() \
             FROM prev \
             WHERE id = prev.prev_id \
             RETURNING {ORDER_COLUMNS}, prev.previous_driver_id"
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(id)
            .bind(driver_id)
            .bind(OrderStatus::PickedUp)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(|r| Assignment {
            order: r.order.into(),
            previous_driver: r.previous_driver_id,
        }))
    }

    async fn list_where(&self, predicate: &str, id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE {predicate} ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Order::from).collect())
    }
}
