//! Category repository.
//!
//! Property definitions are stored in a JSONB column as an ordered array of
//! `{name, values}` objects; serialization goes through the domain type so
//! order is preserved.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use stockroom_core::CategoryId;

use super::RepositoryError;
use crate::models::{Category, CategoryProperty};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    properties: JsonValue,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        let properties: Vec<CategoryProperty> =
            serde_json::from_value(row.properties).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid category properties: {e}"))
            })?;

        Ok(Self {
            id: CategoryId::new(row.id),
            name: row.name,
            properties,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn properties_to_json(properties: &[CategoryProperty]) -> Result<JsonValue, RepositoryError> {
    serde_json::to_value(properties).map_err(|e| {
        RepositoryError::DataCorruption(format!("failed to serialize category properties: {e}"))
    })
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored properties are invalid.
    pub async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, properties, created_at, updated_at
            FROM category
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a category by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored properties are invalid.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, name, properties, created_at, updated_at
            FROM category
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        name: &str,
        properties: &[CategoryProperty],
    ) -> Result<Category, RepositoryError> {
        let properties_json = properties_to_json(properties)?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO category (name, properties)
            VALUES ($1, $2)
            RETURNING id, name, properties, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(properties_json)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Update a category's name and property definitions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CategoryId,
        name: &str,
        properties: &[CategoryProperty],
    ) -> Result<Category, RepositoryError> {
        let properties_json = properties_to_json(properties)?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE category
            SET name = $1, properties = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, properties, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(properties_json)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a category.
    ///
    /// Products referencing it keep their stored property values; the
    /// foreign key nullifies their category reference (ON DELETE SET NULL).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query(r"DELETE FROM category WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
