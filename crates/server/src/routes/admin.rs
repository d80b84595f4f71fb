//! Admin dashboard routes. Every handler requires the admin role.

use axum::{Json, extract::State};

use crate::db::{DriverRepository, OrderRepository, StatsRepository, UserRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{Driver, Order, PlatformStats, User};
use crate::state::AppState;

/// `GET /api/admin/users`
pub async fn users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<User>>> {
    Ok(Json(UserRepository::new(state.pool()).list_all().await?))
}

/// `GET /api/admin/orders`
pub async fn orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(OrderRepository::new(state.pool()).list_all().await?))
}

/// `GET /api/admin/stats`
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<PlatformStats>> {
    Ok(Json(StatsRepository::new(state.pool()).platform_stats().await?))
}

/// `GET /api/admin/drivers` - drivers currently online.
pub async fn drivers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Driver>>> {
    Ok(Json(DriverRepository::new(state.pool()).list_online().await?))
}
