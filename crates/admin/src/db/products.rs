//! Product repository.
//!
//! Images and selected property values live in JSONB columns; the category
//! reference is a nullable foreign key that nullifies on category delete.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use stockroom_core::{CategoryId, Cents, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Field set for creating or replacing a product.
///
/// The same shape serves create and update because the API's PUT semantics
/// replace the whole document, as the forms submit every field.
#[derive(Debug, Clone)]
pub struct ProductData {
    /// Product title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Price in cents.
    pub price: Cents,
    /// Image URLs, in display order.
    pub images: Vec<String>,
    /// Category reference, if any.
    pub category_id: Option<CategoryId>,
    /// Selected property values keyed by property name.
    pub properties: BTreeMap<String, String>,
}

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    title: String,
    description: String,
    price_cents: i64,
    images: JsonValue,
    category_id: Option<i32>,
    properties: JsonValue,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Cents::new(row.price_cents).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;
        let images: Vec<String> = serde_json::from_value(row.images).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product images: {e}"))
        })?;
        let properties: BTreeMap<String, String> = serde_json::from_value(row.properties)
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid product properties: {e}"))
            })?;

        Ok(Self {
            id: ProductId::new(row.id),
            title: row.title,
            description: row.description,
            price,
            images,
            category_id: row.category_id.map(CategoryId::new),
            properties,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn data_to_json(data: &ProductData) -> Result<(JsonValue, JsonValue), RepositoryError> {
    let images = serde_json::to_value(&data.images).map_err(|e| {
        RepositoryError::DataCorruption(format!("failed to serialize product images: {e}"))
    })?;
    let properties = serde_json::to_value(&data.properties).map_err(|e| {
        RepositoryError::DataCorruption(format!("failed to serialize product properties: {e}"))
    })?;
    Ok((images, properties))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price_cents, images,
                   category_id, properties, created_at, updated_at
            FROM product
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List the products in one category, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price_cents, images,
                   category_id, properties, created_at, updated_at
            FROM product
            WHERE category_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(category_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price_cents, images,
                   category_id, properties, created_at, updated_at
            FROM product
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including a
    /// foreign-key violation for an unknown category).
    pub async fn create(&self, data: &ProductData) -> Result<Product, RepositoryError> {
        let (images, properties) = data_to_json(data)?;

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO product (title, description, price_cents, images, category_id, properties)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, price_cents, images,
                      category_id, properties, created_at, updated_at
            ",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.price.as_i64())
        .bind(images)
        .bind(data.category_id.map(|c| c.as_i32()))
        .bind(properties)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        data: &ProductData,
    ) -> Result<Product, RepositoryError> {
        let (images, properties) = data_to_json(data)?;

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE product
            SET title = $1, description = $2, price_cents = $3, images = $4,
                category_id = $5, properties = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING id, title, description, price_cents, images,
                      category_id, properties, created_at, updated_at
            ",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.price.as_i64())
        .bind(images)
        .bind(data.category_id.map(|c| c.as_i32()))
        .bind(properties)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query(r"DELETE FROM product WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
