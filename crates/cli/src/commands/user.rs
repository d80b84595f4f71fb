//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! hub-cli user create -u ops -e ops@example.com -p 'long-password' -r admin
//! ```
//!
//! Admin accounts can only be created here or by registering with the
//! `admin` role.

use delivery_hub_core::Role;
use delivery_hub_server::services::auth::{AuthService, Registration};

/// Arguments for `user create`.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

/// Create a user through the same path as `POST /api/register`.
///
/// # Errors
///
/// Returns an error if the input is invalid, the username or email is taken,
/// or the database is unreachable.
pub async fn create(args: CreateUser) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let user = AuthService::new(&pool)
        .register(Registration {
            username: args.username,
            email: args.email,
            password: args.password,
            first_name: args.first_name,
            last_name: args.last_name,
            role: args.role,
            phone: None,
            address: None,
        })
        .await?;

    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        role = %user.role,
        "User created"
    );
    Ok(())
}
