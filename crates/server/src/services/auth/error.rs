//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] delivery_hub_core::EmailError),

    /// Wrong password or unknown username.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account has been deactivated.
    #[error("account disabled")]
    AccountDisabled,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
