//! OAuth client for the external identity provider.
//!
//! The provider handles sign-in and issues identities; this client only
//! drives the authorization-code flow: build the authorize redirect,
//! exchange the callback code for an access token, and read the signed-in
//! email from the userinfo endpoint. Whether that email belongs to an admin
//! is decided by the caller against the `admin_user` table.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use stockroom_core::Email;

use crate::config::IdentityConfig;

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("provider error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A configured provider URL is invalid.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The provider reported an email this service cannot accept.
    #[error("provider reported an invalid email: {0}")]
    InvalidEmail(String),
}

/// An access token returned by the code exchange.
///
/// Wrapped in [`SecretString`] so it never appears in logs.
pub struct AccessToken(SecretString);

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Response from the userinfo endpoint.
#[derive(Debug, Deserialize)]
struct UserInfo {
    email: String,
}

/// OAuth identity provider client.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    config: IdentityConfig,
}

impl IdentityClient {
    /// Create a new identity provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(IdentityClientInner { client, config }),
        })
    }

    /// Build the authorization URL the browser is redirected to.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorize URL does not parse.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> Result<Url, IdentityError> {
        let mut url = Url::parse(&self.inner.config.authorize_url)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.inner.config.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", "openid email")
            .append_pair("state", state);
        Ok(url)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects the code.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<AccessToken, IdentityError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", &self.inner.config.client_id),
            (
                "client_secret",
                self.inner.config.client_secret.expose_secret(),
            ),
        ];

        let response = self
            .inner
            .client
            .post(&self.inner.config.token_url)
            .form(&params)
            .send()
            .await?;

        let response = error_for_status(response).await?;
        let token: TokenResponse = response.json().await?;
        Ok(AccessToken(SecretString::from(token.access_token)))
    }

    /// Read the signed-in email from the userinfo endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reported email does not
    /// parse as a valid address.
    pub async fn fetch_email(&self, token: &AccessToken) -> Result<Email, IdentityError> {
        let response = self
            .inner
            .client
            .get(&self.inner.config.userinfo_url)
            .bearer_auth(token.0.expose_secret())
            .send()
            .await?;

        let response = error_for_status(response).await?;
        let info: UserInfo = response.json().await?;
        Email::parse(&info.email).map_err(|e| IdentityError::InvalidEmail(e.to_string()))
    }
}

/// Turn non-2xx responses into `IdentityError::Api` with the response body.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(IdentityError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_client() -> IdentityClient {
        IdentityClient::new(IdentityConfig {
            authorize_url: "https://id.test/authorize".to_string(),
            token_url: "https://id.test/token".to_string(),
            userinfo_url: "https://id.test/userinfo".to_string(),
            client_id: "stockroom-admin".to_string(),
            client_secret: SecretString::from("kJ8#mQ2$nP5!rT9@"),
        })
        .unwrap()
    }

    #[test]
    fn test_authorize_url_carries_flow_parameters() {
        let client = test_client();
        let url = client
            .authorize_url("http://localhost:4000/auth/callback", "state-token")
            .unwrap();

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(query.contains(&("response_type".to_string(), "code".to_string())));
        assert!(query.contains(&("client_id".to_string(), "stockroom-admin".to_string())));
        assert!(query.contains(&(
            "redirect_uri".to_string(),
            "http://localhost:4000/auth/callback".to_string()
        )));
        assert!(query.contains(&("state".to_string(), "state-token".to_string())));
    }

    #[test]
    fn test_authorize_url_rejects_bad_config() {
        let client = IdentityClient::new(IdentityConfig {
            authorize_url: "not a url".to_string(),
            token_url: "https://id.test/token".to_string(),
            userinfo_url: "https://id.test/userinfo".to_string(),
            client_id: "stockroom-admin".to_string(),
            client_secret: SecretString::from("kJ8#mQ2$nP5!rT9@"),
        })
        .unwrap();

        assert!(client.authorize_url("http://localhost", "s").is_err());
    }
}
