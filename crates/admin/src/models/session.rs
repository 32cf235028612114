//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

use stockroom_core::{AdminId, Email};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the signed-in admin.
/// Handlers receive this through the `RequireAdmin` extractor rather than
/// reading ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminId,
    /// Admin's email address.
    pub email: Email,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current signed-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the OAuth state token between login redirect and callback.
    pub const OAUTH_STATE: &str = "oauth_state";
}
