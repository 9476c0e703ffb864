//! Domain models for the API.
//!
//! These are the validated shapes handlers and repositories exchange; the
//! database row types live next to their queries in `db`.

pub mod product;
pub mod user;

pub use product::{Product, ProductInput, ProductInputError};
pub use user::{DEFAULT_ROLE, StoredCredentials};
