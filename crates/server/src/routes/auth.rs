//! Account routes: register, login, logout, current user.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use validator::Validate;

use delivery_hub_core::Role;

use super::Success;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::extract::ValidatedJson;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

/// Registration body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub username: String,
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub last_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
}

const fn default_role() -> Role {
    Role::Customer
}

/// Login body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// `POST /api/register` - create an account and log it in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = AuthService::new(state.pool())
        .register(Registration {
            username: body.username,
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            role: body.role,
            phone: body.phone,
            address: body.address,
        })
        .await?;

    start_session(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.pool())
        .login(&body.username, &body.password)
        .await?;

    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
    Ok(Json(user))
}

/// `POST /api/logout` - idempotent.
pub async fn logout(session: Session) -> Result<Json<Success>> {
    clear_current_user(&session).await?;
    session.flush().await?;
    clear_sentry_user();
    Ok(Json(Success::ok()))
}

/// `GET /api/user` - the logged-in user, fresh from the database.
pub async fn current_user(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<User>> {
    let user = AuthService::new(state.pool()).get_user(current.id).await?;
    Ok(Json(user))
}

async fn start_session(session: &Session, user: &User) -> Result<()> {
    // Rotate the session ID on every login.
    session.cycle_id().await?;
    set_current_user(session, &CurrentUser::from(user)).await?;
    set_sentry_user(&user.id, &user.username);
    Ok(())
}
