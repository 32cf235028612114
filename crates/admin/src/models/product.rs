//! Product domain type.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use stockroom_core::{CategoryId, Cents, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Price in cents, non-negative.
    pub price: Cents,
    /// Image URLs, in display order.
    pub images: Vec<String>,
    /// The category this product belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// Selected property values, keyed by property name.
    ///
    /// The map may hold values for properties the category no longer
    /// defines; those are preserved, never pruned. Which of them are
    /// currently editable is decided against the category at read time.
    pub properties: BTreeMap<String, String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
