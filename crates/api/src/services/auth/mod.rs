//! Authentication service.
//!
//! Registration, password login and session lookup. Session tokens
//! themselves are handled by [`crate::services::session`]; this service only
//! decides *who* a request is.

mod error;
pub mod password;

pub use error::AuthError;
pub use password::{hash_password, verify_password};

use sqlx::PgPool;

use pachara_core::{UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::DEFAULT_ROLE;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoggedIn {
    /// Account that logged in.
    pub user_id: UserId,
    /// Username as submitted.
    pub username: String,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with username and password.
    ///
    /// A missing or blank role falls back to [`DEFAULT_ROLE`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` if the username or password is blank.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<UserId, AuthError> {
        let username = Username::parse(username)?;

        if password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".to_owned()));
        }

        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_ROLE);

        let password_hash = hash_blocking(password.to_owned()).await?;

        let user_id = self
            .users
            .create(&username, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user_id, username = %username, role, "User registered");

        Ok(user_id)
    }

    /// Login with username and password.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoggedIn, AuthError> {
        let credentials = self
            .users
            .get_credentials(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_blocking(password.to_owned(), credentials.password_hash).await {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(LoggedIn {
            user_id: credentials.id,
            username: username.trim().to_owned(),
        })
    }

    /// Get the username of a session's user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user no longer exists.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn current_username(&self, user_id: UserId) -> Result<String, AuthError> {
        self.users
            .get_username(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Hash on the blocking pool; Argon2 is deliberately slow.
async fn hash_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}

/// Verify on the blocking pool. A panicked task counts as a mismatch.
async fn verify_blocking(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .unwrap_or(false)
}
