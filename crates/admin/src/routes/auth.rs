//! Sign-in flow against the external OAuth identity provider.
//!
//! The provider authenticates the user; this service only checks that the
//! reported email belongs to a row in `admin_user` before establishing the
//! session. Anyone else is turned away.

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, session_keys};
use crate::state::AppState;

/// Length of the random OAuth state token.
const STATE_TOKEN_LENGTH: usize = 32;

/// Generate a cryptographically secure random string.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", post(logout))
}

/// Query parameters the provider sends to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Redirect the browser to the identity provider.
#[instrument(skip(state, session))]
async fn login(State(state): State<AppState>, session: Session) -> Result<Redirect, AppError> {
    let state_token = generate_random_string(STATE_TOKEN_LENGTH);

    session
        .insert(session_keys::OAUTH_STATE, &state_token)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store OAuth state: {e}")))?;

    let url = state
        .identity()
        .authorize_url(&state.config().oauth_redirect_uri(), &state_token)?;

    Ok(Redirect::to(url.as_str()))
}

/// Handle the provider's callback: verify state, exchange the code, and
/// establish the session if the reported email belongs to an admin.
#[instrument(skip(state, session, params))]
async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    if let Some(error) = params.error {
        return Err(AppError::Unauthorized(format!("sign-in was denied: {error}")));
    }

    let expected_state: Option<String> = session
        .remove(session_keys::OAUTH_STATE)
        .await
        .map_err(|e| AppError::Internal(format!("failed to read OAuth state: {e}")))?;

    match (expected_state, params.state) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => {
            return Err(AppError::Unauthorized(
                "sign-in state mismatch, start over".to_owned(),
            ));
        }
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_owned()))?;

    let redirect_uri = state.config().oauth_redirect_uri();
    let token = state.identity().exchange_code(&code, &redirect_uri).await?;
    let email = state.identity().fetch_email(&token).await?;

    let admin = AdminRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("{email} is not an admin")))?;

    set_current_admin(
        &session,
        &CurrentAdmin {
            id: admin.id,
            email: admin.email,
        },
    )
    .await
    .map_err(|e| AppError::Internal(format!("failed to establish session: {e}")))?;

    tracing::info!(admin_id = %admin.id, "admin signed in");

    Ok(Redirect::to("/api/dashboard"))
}

/// Sign out: drop the admin from the session.
#[instrument(skip(session))]
async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}
