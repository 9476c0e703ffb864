//! Account route handlers: register, login, session check and logout.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::extract::JsonBody;
use crate::middleware::{OptionalSession, RequireSession};
use crate::services::auth::AuthService;
use crate::services::session::SessionCookie;
use crate::state::AppState;

/// Registration payload.
///
/// Absent fields decode as empty so they fail validation rather than decoding.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
}

/// Body of a successful session check.
#[derive(Debug, Serialize)]
pub struct CheckLoginResponse {
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create an account.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, &'static str)> {
    AuthService::new(state.pool())
        .register(&request.username, &request.password, request.role.as_deref())
        .await?;

    Ok((StatusCode::CREATED, "User registered successfully"))
}

/// Check a password and start a session.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<(SessionCookie, Json<LoginResponse>)> {
    let logged_in = AuthService::new(state.pool())
        .login(&request.username, &request.password)
        .await
        .inspect_err(|e| {
            tracing::info!(username = %request.username.trim(), error = %e, "Login failed");
        })?;

    set_sentry_user(&logged_in.user_id, Some(&logged_in.username));
    tracing::info!(user_id = %logged_in.user_id, "User logged in");

    Ok((
        state.sessions().issue(logged_in.user_id),
        Json(LoginResponse {
            username: logged_in.username,
        }),
    ))
}

/// Report who the current session belongs to.
pub async fn check_login(
    State(state): State<AppState>,
    RequireSession(user_id): RequireSession,
) -> Result<Json<CheckLoginResponse>> {
    let username = AuthService::new(state.pool())
        .current_username(user_id)
        .await?;

    Ok(Json(CheckLoginResponse {
        user: SessionUser { username },
    }))
}

/// Expire the session cookie. Succeeds with or without a session.
pub async fn logout(
    State(state): State<AppState>,
    OptionalSession(user_id): OptionalSession,
) -> (SessionCookie, Json<MessageResponse>) {
    if let Some(user_id) = user_id {
        tracing::info!(user_id = %user_id, "User logged out");
    }
    clear_sentry_user();

    (
        state.sessions().invalidate(),
        Json(MessageResponse {
            message: "Logout successful",
        }),
    )
}
