//! CLI subcommands.

pub mod migrate;
pub mod seed;
pub mod user;

use sqlx::PgPool;

use delivery_hub_server::config::database_url_from_env;

/// Connect to the marketplace database named by the environment.
async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let url = database_url_from_env()?;
    tracing::info!("Connecting to database...");
    Ok(delivery_hub_server::db::create_pool(&url).await?)
}
