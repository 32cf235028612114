//! Store settings routes.
//!
//! Settings are independent key/value rows. The two the admin UI works with
//! are the featured product id and the shipping fee, but the surface is a
//! generic name/value store. Reading an absent setting yields `value: null`,
//! not an error.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::db::SettingRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/settings", get(get_setting).put(put_setting))
}

/// Query parameters for reading a setting.
#[derive(Debug, Deserialize)]
pub struct SettingQuery {
    pub name: String,
}

/// Request body for upserting a setting.
#[derive(Debug, Deserialize)]
pub struct SettingPayload {
    pub name: String,
    pub value: JsonValue,
}

/// A setting on the wire.
#[derive(Debug, Serialize)]
pub struct SettingResponse {
    pub name: String,
    pub value: JsonValue,
}

fn require_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("setting name is required".to_owned()));
    }
    Ok(name)
}

/// Read one setting by name.
async fn get_setting(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<SettingQuery>,
) -> Result<Json<SettingResponse>, AppError> {
    let name = require_name(&query.name)?;
    let value = SettingRepository::new(state.pool()).get(name).await?;

    Ok(Json(SettingResponse {
        name: name.to_owned(),
        value: value.unwrap_or(JsonValue::Null),
    }))
}

/// Upsert one setting.
#[instrument(skip(state, payload))]
async fn put_setting(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<SettingPayload>,
) -> Result<Json<SettingResponse>, AppError> {
    let name = require_name(&payload.name)?.to_owned();
    SettingRepository::new(state.pool())
        .set(&name, &payload.value)
        .await?;

    tracing::info!(setting = %name, "setting updated");
    Ok(Json(SettingResponse {
        name,
        value: payload.value,
    }))
}
