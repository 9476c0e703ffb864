//! Integration tests for Pachara.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the API
//! cargo run -p pachara-cli -- migrate
//! cargo run -p pachara-api
//!
//! # Run integration tests
//! cargo test -p pachara-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth` - Register, login, session check and logout
//! - `products` - Product CRUD and CORS
//!
//! Tests talk to a running server over HTTP; set `PACHARA_BASE_URL` when it
//! is not on `http://localhost:8080`.

use reqwest::Client;
use uuid::Uuid;

/// Base URL of the API under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("PACHARA_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// A client that keeps cookies between requests, like a browser tab.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn browser_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A username no other test run has used.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
