//! Authentication middleware and extractors.
//!
//! `RequireAuth` admits any logged-in user. The role guards
//! (`RequireCustomer`, `RequireVendor`, `RequireDriver`, `RequireAdmin`)
//! additionally reject other roles with 403.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn dashboard(RequireVendor(user): RequireVendor) -> impl IntoResponse {
//!     format!("Hello, {}!", user.username)
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use delivery_hub_core::Role;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Error returned when a request fails an authentication guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No logged-in user.
    Unauthorized,
    /// Logged in with a different role than the route needs.
    Forbidden(Role),
}

impl From<AuthRejection> for AppError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::Unauthorized => Self::Unauthorized("Authentication required".to_owned()),
            AuthRejection::Forbidden(role) => Self::Forbidden(format!("{role} role required")),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Extractor that requires a logged-in user of any role.
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts).await.map(Self)
    }
}

/// Read the session user, if any.
///
/// A session that cannot be loaded counts as anonymous.
async fn current_user(parts: &Parts) -> Result<CurrentUser, AuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::Unauthorized)
}

macro_rules! role_guard {
    ($(#[$meta:meta])* $name:ident => $role:expr) => {
        $(#[$meta])*
        pub struct $name(pub CurrentUser);

        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = AuthRejection;

            async fn from_request_parts(
                parts: &mut Parts,
                _state: &S,
            ) -> Result<Self, Self::Rejection> {
                let user = current_user(parts).await?;
                if user.role == $role {
                    Ok(Self(user))
                } else {
                    Err(AuthRejection::Forbidden($role))
                }
            }
        }
    };
}

role_guard!(
    /// Extractor that requires a customer.
    RequireCustomer => Role::Customer
);
role_guard!(
    /// Extractor that requires a vendor.
    RequireVendor => Role::Vendor
);
role_guard!(
    /// Extractor that requires a driver.
    RequireDriver => Role::Driver
);
role_guard!(
    /// Extractor that requires an admin.
    RequireAdmin => Role::Admin
);

/// Store the logged-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Clear the logged-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
