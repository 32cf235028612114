//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sr-cli migrate
//! ```
//!
//! Migration files live in `crates/admin/migrations/` and are embedded into
//! the binary at compile time.

use thiserror::Error;

use super::ConnectError;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Migration error from sqlx.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending admin database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = super::connect().await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
