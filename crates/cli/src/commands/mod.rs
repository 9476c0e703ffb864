//! CLI subcommands.

pub mod migrate;
pub mod secret;
pub mod user;

use pachara_api::config::ConfigError;
use pachara_api::services::auth::AuthError;
use thiserror::Error;

/// Errors surfaced by any subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Account creation failed.
    #[error("User error: {0}")]
    Auth(#[from] AuthError),
}

/// Connect using `PACHARA_DATABASE_URL` (or `DATABASE_URL`).
async fn connect() -> Result<sqlx::PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = pachara_api::config::get_database_url("PACHARA_DATABASE_URL")?;

    tracing::info!("Connecting to database...");
    Ok(pachara_api::db::create_pool(&database_url).await?)
}
