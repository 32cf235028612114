//! Image upload route.
//!
//! Accepts a multipart form of files, pushes each to the object storage
//! service, and returns the public links in submission order.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Upload size cap across the whole multipart body.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Response listing the uploaded objects' public URLs.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub links: Vec<String>,
}

/// Upload the submitted files to object storage.
#[instrument(skip(state, multipart))]
async fn upload(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut links = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field.content_type().map(ToOwned::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;

        if bytes.is_empty() {
            continue;
        }

        let link = state
            .storage()
            .put_object(&file_name, content_type.as_deref(), bytes.to_vec())
            .await?;

        tracing::debug!(file = %file_name, link = %link, "uploaded image");
        links.push(link);
    }

    if links.is_empty() {
        return Err(AppError::BadRequest("no files in upload".to_owned()));
    }

    Ok(Json(UploadResponse { links }))
}
