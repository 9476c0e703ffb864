//! Session extractors.
//!
//! Sessions live in the signed `session-id` cookie, so these extractors only
//! need the request headers and the [`SessionSigner`] in `AppState`.
//!
//! [`SessionSigner`]: crate::services::session::SessionSigner

use axum::{extract::FromRequestParts, http::request::Parts};

use pachara_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a valid session.
///
/// Rejects with 401 "Not logged in" when there is none.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireSession(user_id): RequireSession) -> String {
///     format!("Hello, user {user_id}!")
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireSession(pub UserId);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .sessions()
            .read(&parts.headers)
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Not logged in".to_owned()))
    }
}

/// Extractor that optionally gets the session's user.
///
/// Unlike `RequireSession`, this never rejects.
#[derive(Debug, Clone, Copy)]
pub struct OptionalSession(pub Option<UserId>);

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.sessions().read(&parts.headers)))
    }
}
