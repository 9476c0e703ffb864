//! User management commands.
//!
//! Accounts created here go through the same validation and password
//! hashing as `POST /register`.
//!
//! # Usage
//!
//! ```bash
//! pachara-cli user create -u alice -p 's3cret' -r admin
//! ```

use pachara_api::services::auth::AuthService;
use pachara_core::UserId;

use super::CliError;

/// Create a new user.
///
/// # Arguments
///
/// * `username` - Login name, unique across accounts
/// * `password` - Plain-text password, hashed before storage
/// * `role` - Role label stored with the account
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns an error if the input is invalid, the username is taken or the
/// database is unreachable.
pub async fn create(username: &str, password: &str, role: &str) -> Result<UserId, CliError> {
    let pool = super::connect().await?;

    tracing::info!("Creating user: {} ({})", username.trim(), role);
    let user_id = AuthService::new(&pool)
        .register(username, password, Some(role))
        .await?;

    tracing::info!("User created with ID: {}", user_id);
    Ok(user_id)
}
