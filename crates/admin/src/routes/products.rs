//! Product management routes.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use stockroom_core::{CategoryId, Cents, ProductId};

use crate::db::{CategoryRepository, ProductRepository, products::ProductData};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters for the product list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict the list to one category.
    pub category: Option<CategoryId>,
}

/// Request body for creating or updating a product.
///
/// The price arrives in currency units, as typed into the form.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// A product on the wire, price in currency units.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub category: Option<CategoryId>,
    pub properties: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price.to_decimal(),
            images: product.images,
            category: product.category_id,
            properties: product.properties,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Single-product response, annotated with which properties the product's
/// category currently defines. Stored values for removed properties stay in
/// `properties` but are not listed as editable.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub editable_properties: Vec<String>,
}

impl ProductPayload {
    fn into_data(self) -> Result<ProductData, AppError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(AppError::Validation("product title is required".to_owned()));
        }

        let price = Cents::from_decimal(self.price)
            .map_err(|e| AppError::Validation(format!("invalid price: {e}")))?;

        Ok(ProductData {
            title,
            description: self.description,
            price,
            images: self.images,
            category_id: self.category,
            properties: self.properties,
        })
    }
}

/// Reject payloads referencing a category that doesn't exist, before the
/// foreign key turns it into an opaque database error.
async fn check_category(state: &AppState, category_id: Option<CategoryId>) -> Result<(), AppError> {
    let Some(id) = category_id else {
        return Ok(());
    };

    CategoryRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("unknown category: {id}")))
}

// =============================================================================
// Handlers
// =============================================================================

/// List products, optionally filtered by category.
async fn list_products(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let repo = ProductRepository::new(state.pool());
    let products = match query.category {
        Some(category_id) => repo.list_by_category(category_id).await?,
        None => repo.list_all().await?,
    };

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Fetch one product with its currently editable property names.
async fn get_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    let editable_properties = match product.category_id {
        Some(category_id) => CategoryRepository::new(state.pool())
            .get_by_id(category_id)
            .await?
            .map(|c| c.property_names())
            .unwrap_or_default(),
        None => Vec::new(),
    };

    Ok(Json(ProductDetailResponse {
        product: product.into(),
        editable_properties,
    }))
}

/// Create a product.
#[instrument(skip(state, payload))]
async fn create_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let data = payload.into_data()?;
    check_category(&state, data.category_id).await?;

    let product = ProductRepository::new(state.pool()).create(&data).await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Replace a product's fields.
#[instrument(skip(state, payload))]
async fn update_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<ProductResponse>, AppError> {
    let data = payload.into_data()?;
    check_category(&state, data.category_id).await?;

    let product = ProductRepository::new(state.pool()).update(id, &data).await?;

    Ok(Json(product.into()))
}

/// Delete a product.
#[instrument(skip(state))]
async fn delete_product(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    ProductRepository::new(state.pool()).delete(id).await?;

    tracing::info!(product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_rejects_blank_title() {
        let payload = ProductPayload {
            title: " ".to_string(),
            description: String::new(),
            price: Decimal::new(1999, 2),
            images: vec![],
            category: None,
            properties: BTreeMap::new(),
        };
        assert!(matches!(payload.into_data(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_payload_rejects_negative_price() {
        let payload = ProductPayload {
            title: "Widget".to_string(),
            description: String::new(),
            price: Decimal::new(-1, 2),
            images: vec![],
            category: None,
            properties: BTreeMap::new(),
        };
        assert!(matches!(payload.into_data(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_payload_converts_price_to_cents() {
        let payload = ProductPayload {
            title: "Widget".to_string(),
            description: "A fine widget".to_string(),
            price: Decimal::new(1999, 2),
            images: vec!["https://cdn.test/widget.jpg".to_string()],
            category: None,
            properties: BTreeMap::new(),
        };

        let data = payload.into_data().expect("valid payload");
        assert_eq!(data.price.as_i64(), 1999);
        assert_eq!(data.title, "Widget");
    }
}
