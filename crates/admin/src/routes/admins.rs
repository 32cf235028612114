//! Admin management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use stockroom_core::{AdminId, Email};

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Admin;
use crate::state::AppState;

/// Build the admins router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admins", get(list_admins).post(create_admin))
        .route("/api/admins/{id}", put(update_admin).delete(delete_admin))
}

/// Request body for creating or updating an admin.
#[derive(Debug, Deserialize)]
pub struct AdminPayload {
    pub email: String,
}

fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))
}

/// List all admins.
async fn list_admins(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = AdminRepository::new(state.pool()).list_all().await?;
    Ok(Json(admins))
}

/// Create an admin. Duplicate emails are a validation error.
#[instrument(skip(state, payload))]
async fn create_admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<AdminPayload>,
) -> Result<(StatusCode, Json<Admin>), AppError> {
    let email = parse_email(&payload.email)?;
    let admin = AdminRepository::new(state.pool()).create(&email).await?;

    tracing::info!(admin_id = %admin.id, "admin created");
    Ok((StatusCode::CREATED, Json(admin)))
}

/// Update an admin's email. Colliding with a different admin's email is a
/// validation error; re-submitting the admin's own email is a no-op success.
#[instrument(skip(state, payload))]
async fn update_admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AdminId>,
    Json(payload): Json<AdminPayload>,
) -> Result<Json<Admin>, AppError> {
    let email = parse_email(&payload.email)?;
    let admin = AdminRepository::new(state.pool())
        .update_email(id, &email)
        .await?;

    Ok(Json(admin))
}

/// Delete an admin. Removing the last one is refused by the repository,
/// atomically, and surfaces as a validation error.
#[instrument(skip(state))]
async fn delete_admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AdminId>,
) -> Result<StatusCode, AppError> {
    AdminRepository::new(state.pool()).delete(id).await?;

    tracing::info!(admin_id = %id, "admin deleted");
    Ok(StatusCode::NO_CONTENT)
}
