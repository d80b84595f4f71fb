//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          liveness
//! GET  /health/ready                    readiness (database ping)
//!
//! POST /api/register                    create account + log in
//! POST /api/login
//! POST /api/logout
//! GET  /api/user                        current user
//!
//! GET  /api/vendors                     open vendors
//! GET  /api/vendors/me                  vendor: own profile
//! GET  /api/vendors/{id}
//! POST /api/vendors                     vendor: create profile
//! PUT  /api/vendors/{id}/status         vendor: open/close
//! GET  /api/vendors/{id}/menu
//! POST /api/menu-items                  vendor: add to own menu
//! PUT  /api/menu-items/{id}/availability
//!
//! POST /api/orders                      customer: place order
//! GET  /api/orders/{id}                 parties + admin
//! GET  /api/my-orders
//! PUT  /api/orders/{id}/status          role whitelist
//! GET  /api/available-orders            driver: ready orders
//! POST /api/orders/{id}/assign          driver: claim
//!
//! POST /api/drivers                     driver: create profile
//! PUT  /api/drivers/{id}/status         driver: online/offline
//!
//! GET  /api/admin/users
//! GET  /api/admin/orders
//! GET  /api/admin/stats
//! GET  /api/admin/drivers               online drivers
//! ```

pub mod admin;
pub mod auth;
pub mod drivers;
pub mod health;
pub mod menu;
pub mod orders;
pub mod vendors;

use axum::{
    Router,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

use delivery_hub_core::{MAX_AMOUNT, fits_column};

use crate::state::AppState;

/// Body returned by endpoints that only acknowledge success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Money must be non-negative and fit a `NUMERIC(10,2)` column.
fn money(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    if !fits_column(*value) {
        let mut err = ValidationError::new("max_amount");
        err.message = Some(format!("must not exceed {MAX_AMOUNT}").into());
        return Err(err);
    }
    Ok(())
}

/// Build the health and `/api` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Account
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
        // Vendors and menus
        .route("/vendors", get(vendors::list).post(vendors::create))
        .route("/vendors/me", get(vendors::mine))
        .route("/vendors/{id}", get(vendors::show))
        .route("/vendors/{id}/status", put(vendors::set_status))
        .route("/vendors/{id}/menu", get(menu::list_for_vendor))
        .route("/menu-items", post(menu::create))
        .route("/menu-items/{id}/availability", put(menu::set_availability))
        // Orders
        .route("/orders", post(orders::place))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/orders/{id}/assign", post(orders::assign))
        .route("/my-orders", get(orders::mine))
        .route("/available-orders", get(orders::available))
        // Drivers
        .route("/drivers", post(drivers::create))
        .route("/drivers/{id}/status", put(drivers::set_status))
        // Admin
        .route("/admin/users", get(admin::users))
        .route("/admin/orders", get(admin::orders))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/drivers", get(admin::drivers))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_money_sign() {
        assert!(money(&Decimal::ZERO).is_ok());
        assert!(money(&Decimal::new(299, 2)).is_ok());
        assert!(money(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_money_upper_bound() {
        assert!(money(&MAX_AMOUNT).is_ok());

        let over = money(&Decimal::new(10_000_000_000, 2)).unwrap_err();
        assert_eq!(over.code, "max_amount");
        assert_eq!(
            over.message.as_deref(),
            Some("must not exceed 99999999.99")
        );

        assert!(money(&Decimal::MAX).is_err());
    }

    #[test]
    fn test_success_body() {
        assert_eq!(
            serde_json::to_value(Success::ok()).ok(),
            Some(serde_json::json!({ "success": true }))
        );
    }
}
