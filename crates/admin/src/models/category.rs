//! Category domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, PropertyValues};

/// A named attribute defined on a category (e.g. "color"), with the ordered
/// list of values a product may select from.
///
/// Stored as-is in the category's JSONB `properties` column, so it derives
/// both serde traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProperty {
    /// Property name, unique within its category.
    pub name: String,
    /// Allowed values, in definition order.
    pub values: PropertyValues,
}

/// A product category.
///
/// Categories are flat; there is no parent hierarchy.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Category name, non-empty.
    pub name: String,
    /// Ordered property definitions.
    pub properties: Vec<CategoryProperty>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Names of the properties currently defined on this category, in order.
    #[must_use]
    pub fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }
}
