//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration input rejected (blank username, blank password, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid credentials (wrong password or unknown username).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session points at a user that no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// Username already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl From<pachara_core::UsernameError> for AuthError {
    fn from(err: pachara_core::UsernameError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
