//! Object-storage client for image uploads.
//!
//! Uploaded files go to an external bucket-style storage service over its
//! REST API (bearer-token authenticated PUT per object); the service hosts
//! the files and this client only hands back public URLs. Object names are
//! randomized, keeping the original extension so the CDN serves the right
//! content type.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use uuid::Uuid;

use crate::config::StorageConfig;

/// Longest extension carried over from an uploaded filename.
const MAX_EXTENSION_LENGTH: usize = 8;

/// Errors that can occur when talking to the storage service.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage service returned an error response.
    #[error("storage error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The configured API token is not a valid header value.
    #[error("invalid storage API token")]
    InvalidToken,
}

/// Object storage client.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    public_url: String,
}

impl StorageClient {
    /// Create a new storage client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the API token
    /// is not a valid header value.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        let mut auth_value =
            HeaderValue::from_str(&auth_value).map_err(|_| StorageError::InvalidToken)?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(StorageClientInner {
                client,
                endpoint: config.endpoint.trim_end_matches('/').to_owned(),
                bucket: config.bucket.clone(),
                public_url: config.public_url.trim_end_matches('/').to_owned(),
            }),
        })
    }

    /// Upload one object and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects the upload.
    pub async fn put_object(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let key = object_key(original_name);
        let url = format!("{}/{}/{key}", self.inner.endpoint, self.inner.bucket);

        let mut request = self.inner.client.put(&url).body(bytes);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type.to_owned());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(format!(
            "{}/{}/{key}",
            self.inner.public_url, self.inner.bucket
        ))
    }
}

/// Randomized object name, keeping a sane extension from the original.
fn object_key(original_name: &str) -> String {
    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LENGTH
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}
