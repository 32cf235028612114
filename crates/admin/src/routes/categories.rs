//! Category management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use stockroom_core::{CategoryId, PropertyValues};

use crate::db::CategoryRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{Category, CategoryProperty};
use crate::state::AppState;

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            put(update_category).delete(delete_category),
        )
}

/// Request body for creating or updating a category.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyPayload>,
}

/// One property definition as submitted by the editing form.
#[derive(Debug, Deserialize)]
pub struct PropertyPayload {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl CategoryPayload {
    /// Validate the payload into a name and ordered property definitions.
    ///
    /// Property rows without a name are dropped; the editing form submits
    /// blank rows when "add property" was clicked but never filled in.
    fn into_parts(self) -> Result<(String, Vec<CategoryProperty>), AppError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::Validation("category name is required".to_owned()));
        }

        let properties = self
            .properties
            .into_iter()
            .filter_map(|p| {
                let property_name = p.name.trim().to_owned();
                if property_name.is_empty() {
                    return None;
                }
                Some(CategoryProperty {
                    name: property_name,
                    values: PropertyValues::new(p.values),
                })
            })
            .collect();

        Ok((name, properties))
    }
}

/// List all categories.
async fn list_categories(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(categories))
}

/// Create a category.
#[instrument(skip(state, payload))]
async fn create_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let (name, properties) = payload.into_parts()?;
    let category = CategoryRepository::new(state.pool())
        .create(&name, &properties)
        .await?;

    tracing::info!(category_id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category's name and property definitions.
#[instrument(skip(state, payload))]
async fn update_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    let (name, properties) = payload.into_parts()?;
    let category = CategoryRepository::new(state.pool())
        .update(id, &name, &properties)
        .await?;

    Ok(Json(category))
}

/// Delete a category. Products referencing it become uncategorized; their
/// stored property values stay put.
#[instrument(skip(state))]
async fn delete_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, AppError> {
    CategoryRepository::new(state.pool()).delete(id).await?;

    tracing::info!(category_id = %id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_requires_a_name() {
        let payload = CategoryPayload {
            name: "   ".to_string(),
            properties: vec![],
        };
        assert!(matches!(
            payload.into_parts(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_payload_drops_blank_property_rows() {
        let payload = CategoryPayload {
            name: "Shirts".to_string(),
            properties: vec![
                PropertyPayload {
                    name: "color".to_string(),
                    values: vec!["red".to_string(), " blue ".to_string(), String::new()],
                },
                PropertyPayload {
                    name: "  ".to_string(),
                    values: vec!["ignored".to_string()],
                },
            ],
        };

        let (name, properties) = payload.into_parts().expect("valid payload");
        assert_eq!(name, "Shirts");
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].name, "color");
        assert_eq!(properties[0].values.as_slice(), ["red", "blue"]);
    }
}
