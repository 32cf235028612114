//! Admin user domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::{AdminId, Email};

/// An admin allowed to sign in to this API.
///
/// There are no roles or permission levels; holding a row in `admin_user`
/// is the entire authorization model. The invariant that at least one admin
/// exists at all times is enforced by the delete operation.
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    /// Unique admin ID.
    pub id: AdminId,
    /// Admin's email address, as reported by the identity provider.
    pub email: Email,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
}
