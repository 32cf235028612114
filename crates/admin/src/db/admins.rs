//! Admin user repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use stockroom_core::{AdminId, Email};

use super::RepositoryError;
use crate::models::Admin;

/// Conflict message for duplicate admin emails, surfaced to the client.
const DUPLICATE_EMAIL: &str = "admin email already exists";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` admin queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AdminId::new(row.id),
            email,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin user database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all admins, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Admin>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, created_at
            FROM admin_user
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an admin by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, created_at
            FROM admin_user
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an admin by their email address.
    ///
    /// Used at sign-in time: the email the identity provider reports must
    /// match a row here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, created_at
            FROM admin_user
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new admin.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, email: &Email) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admin_user (email)
            VALUES ($1)
            RETURNING id, email, created_at
            ",
        )
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, DUPLICATE_EMAIL))?;

        row.try_into()
    }

    /// Update an admin's email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin doesn't exist.
    /// Returns `RepositoryError::Conflict` if the email belongs to another admin.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_email(
        &self,
        id: AdminId,
        email: &Email,
    ) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            UPDATE admin_user
            SET email = $1
            WHERE id = $2
            RETURNING id, email, created_at
            ",
        )
        .bind(email.as_str())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, DUPLICATE_EMAIL))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete an admin, refusing to remove the last one.
    ///
    /// The guard is part of the DELETE statement itself, so two concurrent
    /// deletes cannot both observe "two admins left" and empty the table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if this is the last admin.
    /// Returns `RepositoryError::NotFound` if the admin doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AdminId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM admin_user
            WHERE id = $1
              AND (SELECT COUNT(*) FROM admin_user) > 1
            ",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Either the id is unknown or the guard refused; tell them apart.
            return if self.get_by_id(id).await?.is_some() {
                Err(RepositoryError::Conflict(
                    "at least one admin is required".to_owned(),
                ))
            } else {
                Err(RepositoryError::NotFound)
            };
        }

        Ok(())
    }

    /// Count all admins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(r"SELECT COUNT(*) FROM admin_user")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
