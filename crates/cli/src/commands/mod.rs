//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors shared by commands that need a database connection.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect to the admin database using `ADMIN_DATABASE_URL`
/// (falling back to `DATABASE_URL`).
pub(crate) async fn connect() -> Result<sqlx::PgPool, ConnectError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| ConnectError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to admin database...");
    Ok(sqlx::PgPool::connect(&database_url).await?)
}
