//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::AdminConfig,
    services::{IdentityClient, IdentityError, StorageClient, StorageError},
};

/// Errors that can occur while building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build identity client: {0}")]
    Identity(#[from] IdentityError),
    #[error("failed to build storage client: {0}")]
    Storage(#[from] StorageError),
}

/// Application state shared across all handlers.
///
/// Cheap to clone; the inner data lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    identity: IdentityClient,
    storage: StorageClient,
}

impl AppState {
    /// Build the application state from configuration and a database pool.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the external-service clients fails to build.
    pub fn new(config: AdminConfig, pool: PgPool) -> Result<Self, StateError> {
        let identity = IdentityClient::new(config.identity.clone())?;
        let storage = StorageClient::new(&config.storage)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
                storage,
            }),
        })
    }

    /// The application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The identity provider client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    /// The object storage client.
    #[must_use]
    pub fn storage(&self) -> &StorageClient {
        &self.inner.storage
    }
}
