//! Application state shared across handlers.

use std::sync::Arc;

use axum::http::header::InvalidHeaderValue;
use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::middleware::CorsPolicy;
use crate::services::session::SessionSigner;

/// Error building application state from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid CORS origin: {0}")]
    InvalidCorsOrigin(#[from] InvalidHeaderValue),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the session signer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    sessions: SessionSigner,
    cors: CorsPolicy,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `pool` - `PostgreSQL` connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the configured CORS origin is not a valid header value.
    pub fn new(config: &ApiConfig, pool: PgPool) -> Result<Self, StateError> {
        let sessions = SessionSigner::new(
            config.session_secret.clone(),
            config.session_ttl_seconds,
            config.secure_cookies(),
        );
        let cors = CorsPolicy::new(&config.cors_origin)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                pool,
                sessions,
                cors,
            }),
        })
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the session signer.
    #[must_use]
    pub fn sessions(&self) -> &SessionSigner {
        &self.inner.sessions
    }

    /// Get a reference to the CORS policy.
    #[must_use]
    pub fn cors(&self) -> &CorsPolicy {
        &self.inner.cors
    }
}
