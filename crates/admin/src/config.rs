//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ADMIN_BASE_URL` - Public URL for the admin API (used for OAuth redirects)
//! - `ADMIN_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `OAUTH_AUTHORIZE_URL` - Identity provider authorization endpoint
//! - `OAUTH_TOKEN_URL` - Identity provider token endpoint
//! - `OAUTH_USERINFO_URL` - Identity provider userinfo endpoint
//! - `OAUTH_CLIENT_ID` - OAuth client ID
//! - `OAUTH_CLIENT_SECRET` - OAuth client secret
//! - `STORAGE_ENDPOINT` - Object storage API endpoint for image uploads
//! - `STORAGE_BUCKET` - Object storage bucket name
//! - `STORAGE_API_TOKEN` - Object storage bearer token
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 4000)
//! - `STORAGE_PUBLIC_URL` - Public base URL for uploaded objects
//!   (default: `STORAGE_ENDPOINT`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin API
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// OAuth identity provider configuration
    pub identity: IdentityConfig,
    /// Object storage configuration for image uploads
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// OAuth identity provider configuration.
///
/// The provider issues identities; this service only checks the reported
/// email against the `admin_user` table. Implements `Debug` manually to
/// redact the client secret.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Authorization endpoint the browser is redirected to.
    pub authorize_url: String,
    /// Token endpoint for the authorization-code exchange.
    pub token_url: String,
    /// Userinfo endpoint reporting the signed-in email.
    pub userinfo_url: String,
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Object storage configuration for image uploads.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct StorageConfig {
    /// Storage API endpoint uploads are sent to.
    pub endpoint: String,
    /// Bucket objects are stored in.
    pub bucket: String,
    /// Bearer token for the storage API.
    pub api_token: SecretString,
    /// Public base URL uploaded objects are served from.
    pub public_url: String,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("api_token", &"[REDACTED]")
            .field("public_url", &self.public_url)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ADMIN_DATABASE_URL")?;
        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "4000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        let session_secret = get_validated_secret("ADMIN_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "ADMIN_SESSION_SECRET")?;

        let identity = IdentityConfig::from_env()?;
        let storage = StorageConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            identity,
            storage,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The OAuth redirect URI derived from the base URL.
    #[must_use]
    pub fn oauth_redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.base_url.trim_end_matches('/'))
    }
}

impl IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            authorize_url: get_required_env("OAUTH_AUTHORIZE_URL")?,
            token_url: get_required_env("OAUTH_TOKEN_URL")?,
            userinfo_url: get_required_env("OAUTH_USERINFO_URL")?,
            client_id: get_required_env("OAUTH_CLIENT_ID")?,
            client_secret: get_validated_secret("OAUTH_CLIENT_SECRET")?,
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = get_required_env("STORAGE_ENDPOINT")?;
        let public_url = get_optional_env("STORAGE_PUBLIC_URL").unwrap_or_else(|| endpoint.clone());

        Ok(Self {
            endpoint,
            bucket: get_required_env("STORAGE_BUCKET")?,
            api_token: get_validated_secret("STORAGE_API_TOKEN")?,
            public_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real secrets like API keys have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 4000,
            base_url: "http://localhost:4000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            identity: IdentityConfig {
                authorize_url: "https://id.test/authorize".to_string(),
                token_url: "https://id.test/token".to_string(),
                userinfo_url: "https://id.test/userinfo".to_string(),
                client_id: "client-id".to_string(),
                client_secret: SecretString::from("kJ8#mQ2$nP5!rT9@"),
            },
            storage: StorageConfig {
                endpoint: "https://storage.test/v1".to_string(),
                bucket: "product-images".to_string(),
                api_token: SecretString::from("aB3$xY9!mK2@nL5#"),
                public_url: "https://cdn.test".to_string(),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_shannon_entropy_uniform() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        // "ab" has 1 bit per char (50% a, 50% b)
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
        assert!(validate_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn test_oauth_redirect_uri_trims_trailing_slash() {
        let mut config = test_config();
        config.base_url = "http://localhost:4000/".to_string();
        assert_eq!(
            config.oauth_redirect_uri(),
            "http://localhost:4000/auth/callback"
        );
    }

    #[test]
    fn test_identity_config_debug_redacts_secrets() {
        let config = test_config();
        let debug_output = format!("{:?}", config.identity);
        assert!(debug_output.contains("client-id"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kJ8#mQ2$nP5!rT9@"));
    }

    #[test]
    fn test_storage_config_debug_redacts_secrets() {
        let config = test_config();
        let debug_output = format!("{:?}", config.storage);
        assert!(debug_output.contains("product-images"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("aB3$xY9!mK2@nL5#"));
    }
}
