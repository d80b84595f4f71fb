//! User repository for database operations.

use sqlx::PgPool;
use tracing::instrument;

use delivery_hub_core::UserId;

use super::RepositoryError;
use crate::models::{NewUser, User};

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, role, phone, address, \
                            is_active, created_at";

/// A user row plus its password hash, used only for login.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by their username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user together with their password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = $1");
        let row = sqlx::query_as::<_, CredentialRow>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(|r| (r.user, r.password_hash)))
    }

    /// Insert a new user.
    ///
    /// Duplicate usernames or emails surface as `RepositoryError::Database`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, new), fields(username = %new.username, role = %new.role))]
    pub async fn create(&self, new: &NewUser) -> Result<User, RepositoryError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, role, \
                                phone, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new.username)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(new.role)
            .bind(&new.phone)
            .bind(&new.address)
            .fetch_one(self.pool)
            .await?;
        Ok(user)
    }

    /// List every user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(self.pool).await?;
        Ok(users)
    }
}
