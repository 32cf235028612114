//! Order domain types.
//!
//! Orders are written by the external checkout flow and are read-only in
//! this API. Line items snapshot the purchased product by name and unit
//! price, so later product edits never change what an order shows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{Cents, OrderId};

/// A purchased product snapshot on an order.
///
/// Stored in the order's JSONB `line_items` column, so it derives both
/// serde traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name at time of purchase.
    pub product_name: String,
    /// Purchased quantity, at least 1.
    pub quantity: u32,
    /// Unit price in cents at time of purchase.
    pub unit_amount: Cents,
}

impl LineItem {
    /// Line total in currency units: quantity x unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_amount.to_decimal() * Decimal::from(self.quantity)
    }
}

/// A customer order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
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

impl Order {
    /// Order revenue in currency units: the sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(quantity: u32, unit_cents: i64) -> LineItem {
        LineItem {
            product_name: "widget".to_string(),
            quantity,
            unit_amount: Cents::new(unit_cents).unwrap(),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(3, 250).line_total(), Decimal::new(750, 2));
    }

    #[test]
    fn test_order_total_sums_line_items() {
        let order = Order {
            id: OrderId::new(1),
            customer_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            street_address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            country: "US".to_string(),
            line_items: vec![item(2, 1000), item(1, 500)],
            paid: true,
            created_at: Utc::now(),
        };

        // 2 x 10.00 + 1 x 5.00 = 25.00
        assert_eq!(order.total(), Decimal::new(2500, 2));
    }

    #[test]
    fn test_order_total_empty() {
        let order = Order {
            id: OrderId::new(2),
            customer_name: String::new(),
            email: String::new(),
            street_address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            country: String::new(),
            line_items: vec![],
            paid: false,
            created_at: Utc::now(),
        };
        assert_eq!(order.total(), Decimal::ZERO);
    }
}
