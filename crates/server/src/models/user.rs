//! User domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use delivery_hub_core::{Email, Role, UserId};

/// A marketplace account.
///
/// The password hash lives only in the database and in
/// [`crate::db::users::UserRepository::get_credentials_by_username`].
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
}
