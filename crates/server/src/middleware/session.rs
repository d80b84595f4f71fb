//! Session middleware configuration.
//!
//! Sessions live in `PostgreSQL` via tower-sessions; the table is created by
//! a migration, never at startup.

use std::time::Duration;

use tokio::task::JoinHandle;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, cookie::SameSite};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "hub_session";

/// Session expiry time in seconds (7 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// How often expired sessions are purged.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Create the session layer around any store.
///
/// Production passes a [`PostgresStore`]; tests pass a `MemoryStore`.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &ServerConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Spawn a background task that deletes expired sessions every hour.
#[must_use]
pub fn spawn_expired_session_cleanup(store: PostgresStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = store.delete_expired().await {
                tracing::warn!(error = %e, "Failed to delete expired sessions");
            }
        }
    })
}
