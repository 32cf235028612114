//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Bootstrap the first admin (required before anyone can sign in)
//! sr-cli admin create -e admin@example.com
//! ```

use thiserror::Error;

use stockroom_admin::db::{AdminRepository, RepositoryError};
use stockroom_core::{AdminId, Email};

use super::ConnectError;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Could not connect to the database.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Admin user already exists.
    #[error("Admin already exists with email: {0}")]
    AlreadyExists(String),

    /// Repository error.
    #[error("Database error: {0}")]
    Repository(RepositoryError),
}

/// Create a new admin user, returning its ID.
///
/// # Errors
///
/// Returns an error if the email is invalid, the admin already exists, or
/// the database operation fails.
pub async fn create_user(email: &str) -> Result<AdminId, AdminError> {
    let email = Email::parse(email).map_err(|e| AdminError::InvalidEmail(e.to_string()))?;

    let pool = super::connect().await?;
    let repo = AdminRepository::new(&pool);

    tracing::info!("Creating admin: {}", email);
    let admin = repo.create(&email).await.map_err(|e| match e {
        RepositoryError::Conflict(_) => AdminError::AlreadyExists(email.to_string()),
        other => AdminError::Repository(other),
    })?;

    tracing::info!("Created admin {} with id {}", admin.email, admin.id);
    Ok(admin.id)
}
