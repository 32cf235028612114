//! Seed the database with demo data.
//!
//! # Usage
//!
//! ```bash
//! sr-cli seed
//! ```
//!
//! Inserts a couple of categories and products, a spread of recent orders
//! (orders normally arrive via the external checkout, so development
//! databases have none), and default settings. Safe to run repeatedly; it
//! just inserts more rows.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use serde_json::json;
use thiserror::Error;

use stockroom_admin::db::{
    CategoryRepository, OrderRepository, ProductRepository, RepositoryError, SettingRepository,
    orders::OrderData, products::ProductData, settings::names,
};
use stockroom_admin::models::{CategoryProperty, LineItem};
use stockroom_core::{Cents, MoneyError, PropertyValues};

use super::ConnectError;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Could not connect to the database.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Repository error.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// A seed amount is invalid.
    #[error("Invalid seed amount: {0}")]
    Money(#[from] MoneyError),
}

/// Insert demo categories, products, orders and settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    let pool = super::connect().await?;

    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let orders = OrderRepository::new(&pool);
    let settings = SettingRepository::new(&pool);

    tracing::info!("Seeding categories...");
    let apparel = categories
        .create(
            "Apparel",
            &[
                CategoryProperty {
                    name: "color".to_owned(),
                    values: PropertyValues::parse_csv("black,white,navy"),
                },
                CategoryProperty {
                    name: "size".to_owned(),
                    values: PropertyValues::parse_csv("s,m,l,xl"),
                },
            ],
        )
        .await?;
    let mugs = categories.create("Mugs", &[]).await?;

    tracing::info!("Seeding products...");
    let tee = products
        .create(&ProductData {
            title: "Logo Tee".to_owned(),
            description: "Soft cotton tee with the store logo.".to_owned(),
            price: Cents::new(2500)?,
            images: vec![],
            category_id: Some(apparel.id),
            properties: BTreeMap::from([
                ("color".to_owned(), "black".to_owned()),
                ("size".to_owned(), "m".to_owned()),
            ]),
        })
        .await?;
    let mug = products
        .create(&ProductData {
            title: "Enamel Mug".to_owned(),
            description: "Camp-style enamel mug, 350ml.".to_owned(),
            price: Cents::new(1500)?,
            images: vec![],
            category_id: Some(mugs.id),
            properties: BTreeMap::new(),
        })
        .await?;

    tracing::info!("Seeding orders...");
    let now = Utc::now();
    for (days_ago, items) in [
        (0_i64, vec![(2_u32, 2500_i64)]),
        (1, vec![(1, 2500), (1, 1500)]),
        (3, vec![(4, 1500)]),
        (9, vec![(1, 2500)]),
        (20, vec![(2, 1500), (2, 2500)]),
    ] {
        let line_items = items
            .into_iter()
            .map(|(quantity, unit_cents)| {
                Ok(LineItem {
                    product_name: if unit_cents == 2500 {
                        tee.title.clone()
                    } else {
                        mug.title.clone()
                    },
                    quantity,
                    unit_amount: Cents::new(unit_cents)?,
                })
            })
            .collect::<Result<Vec<_>, MoneyError>>()?;

        orders
            .create(&OrderData {
                customer_name: "Demo Customer".to_owned(),
                email: "customer@example.com".to_owned(),
                street_address: "1 Main St".to_owned(),
                city: "Springfield".to_owned(),
                postal_code: "12345".to_owned(),
                country: "US".to_owned(),
                line_items,
                paid: true,
                created_at: now - Duration::days(days_ago),
            })
            .await?;
    }

    tracing::info!("Seeding settings...");
    settings
        .set(names::FEATURED_PRODUCT_ID, &json!(tee.id.as_i32()))
        .await?;
    settings.set(names::SHIPPING_FEE, &json!("5")).await?;

    tracing::info!("Seed complete!");
    Ok(())
}
