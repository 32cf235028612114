//! Database operations for the admin `PostgreSQL` database.
//!
//! # Tables
//!
//! - `admin_user` - Admins allowed to sign in
//! - `session` - Cookie session storage (tower-sessions)
//! - `category` - Product categories with property definitions (JSONB)
//! - `product` - Products (images and property values as JSONB)
//! - `store_order` - Orders written by the external checkout (JSONB line items)
//! - `setting` - Key/value store settings (JSONB values)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p stockroom-cli -- migrate
//! ```
//!
//! Queries use the sqlx runtime API with `FromRow` row structs that convert
//! into domain models via `TryFrom`, so the workspace builds without a live
//! database.

pub mod admins;
pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use categories::CategoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use settings::SettingRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, last admin).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error to `Conflict` when it is a unique violation,
    /// keeping everything else as `Database`.
    pub(crate) fn from_unique_violation(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
