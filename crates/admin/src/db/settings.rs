//! Setting repository.
//!
//! Settings are independent key/value rows, not one settings document.
//! Values are JSONB; an absent key reads as `None`, never an error.

use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use stockroom_core::ProductId;

use super::RepositoryError;

/// Names of the settings this surface works with.
pub mod names {
    /// Product id highlighted on the storefront.
    pub const FEATURED_PRODUCT_ID: &str = "featuredProductId";
    /// Flat shipping fee in currency units.
    pub const SHIPPING_FEE: &str = "shippingFee";
}

/// Repository for setting database operations.
pub struct SettingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingRepository<'a> {
    /// Create a new setting repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a setting value by name. Absent settings read as `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, name: &str) -> Result<Option<JsonValue>, RepositoryError> {
        let value: Option<JsonValue> =
            sqlx::query_scalar(r"SELECT value FROM setting WHERE name = $1")
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

        Ok(value)
    }

    /// Upsert a setting value by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set(&self, name: &str, value: &JsonValue) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO setting (name, value)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET value = $2, updated_at = NOW()
            ",
        )
        .bind(name)
        .bind(value)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The featured product id, if one is set and well-formed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured_product_id(&self) -> Result<Option<ProductId>, RepositoryError> {
        let value = self.get(names::FEATURED_PRODUCT_ID).await?;
        Ok(value.and_then(|v| parse_product_id(&v)))
    }

    /// The shipping fee in currency units, if one is set and well-formed.
    ///
    /// The UI historically submitted the fee as a string, so both JSON
    /// numbers and numeric strings are accepted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn shipping_fee(&self) -> Result<Option<Decimal>, RepositoryError> {
        let value = self.get(names::SHIPPING_FEE).await?;
        Ok(value.and_then(|v| parse_decimal(&v)))
    }
}

fn parse_product_id(value: &JsonValue) -> Option<ProductId> {
    match value {
        JsonValue::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        JsonValue::String(s) => s.parse::<i32>().ok(),
        _ => None,
    }
    .map(ProductId::new)
}

fn parse_decimal(value: &JsonValue) -> Option<Decimal> {
    match value {
        JsonValue::Number(n) => n.to_string().parse().ok(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_product_id_from_number_and_string() {
        assert_eq!(parse_product_id(&json!(7)), Some(ProductId::new(7)));
        assert_eq!(parse_product_id(&json!("12")), Some(ProductId::new(12)));
        assert_eq!(parse_product_id(&json!(null)), None);
        assert_eq!(parse_product_id(&json!("not-an-id")), None);
    }

    #[test]
    fn test_parse_decimal_from_number_and_string() {
        assert_eq!(parse_decimal(&json!(4.5)), Some(Decimal::new(45, 1)));
        assert_eq!(parse_decimal(&json!("19.99")), Some(Decimal::new(1999, 2)));
        assert_eq!(parse_decimal(&json!([])), None);
    }
}
