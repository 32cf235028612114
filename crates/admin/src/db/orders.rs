//! Order repository.
//!
//! Orders are written by the external checkout flow; this API only reads
//! them. The insert below exists for the `sr-cli seed` development tool.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use stockroom_core::OrderId;

use super::RepositoryError;
use crate::models::{LineItem, Order};

/// Field set for seeding an order.
#[derive(Debug, Clone)]
pub struct OrderData {
    /// Customer name.
    pub customer_name: String,
    /// Customer email.
    pub email: String,
    /// Street address.
    pub street_address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Purchased items, in cart order.
    pub line_items: Vec<LineItem>,
    /// Whether payment completed.
    pub paid: bool,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_name: String,
    email: String,
    street_address: String,
    city: String,
    postal_code: String,
    country: String,
    line_items: JsonValue,
    paid: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let line_items: Vec<LineItem> = serde_json::from_value(row.line_items).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order line items: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            customer_name: row.customer_name,
            email: row.email,
            street_address: row.street_address,
            city: row.city,
            postal_code: row.postal_code,
            country: row.country,
            line_items,
            paid: row.paid,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored line items are invalid.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_name, email, street_address, city,
                   postal_code, country, line_items, paid, created_at
            FROM store_order
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Insert an order (seed tool only; the admin surface is read-only).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, data: &OrderData) -> Result<Order, RepositoryError> {
        let line_items = serde_json::to_value(&data.line_items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize line items: {e}"))
        })?;

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO store_order
                (customer_name, email, street_address, city, postal_code,
                 country, line_items, paid, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, customer_name, email, street_address, city,
                      postal_code, country, line_items, paid, created_at
            ",
        )
        .bind(&data.customer_name)
        .bind(&data.email)
        .bind(&data.street_address)
        .bind(&data.city)
        .bind(&data.postal_code)
        .bind(&data.country)
        .bind(line_items)
        .bind(data.paid)
        .bind(data.created_at)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
