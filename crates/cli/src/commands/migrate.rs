//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! hub-cli migrate
//! ```
//!
//! Migration files live in `crates/server/migrations/` and are embedded at
//! compile time.

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
