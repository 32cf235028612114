//! Service clients and pure domain services.
//!
//! - [`identity`] - OAuth client for the external identity provider
//! - [`storage`] - object-storage client for image uploads
//! - [`stats`] - order statistics for the dashboard

pub mod identity;
pub mod stats;
pub mod storage;

pub use identity::{IdentityClient, IdentityError};
pub use storage::{StorageClient, StorageError};
