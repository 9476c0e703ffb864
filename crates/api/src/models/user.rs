//! User domain types.

use pachara_core::UserId;

/// Role assigned when a registration does not name one.
pub const DEFAULT_ROLE: &str = "user";

/// What login needs from a stored account: its id and password hash.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    /// Account ID.
    pub id: UserId,
    /// Argon2 PHC string.
    pub password_hash: String,
}
