//! Integration tests for Stockroom.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! sr-cli migrate
//!
//! # Bootstrap an admin and start the server
//! sr-cli admin create -e admin@example.com
//! cargo run -p stockroom-admin
//!
//! # Sign in through the browser, copy the `stockroom_session` cookie value,
//! # then run the ignored tests:
//! ADMIN_TEST_SESSION=<cookie value> cargo test -p stockroom-integration-tests -- --ignored
//! ```
//!
//! The tests talk HTTP to a running server; they are `#[ignore]`d so a
//! plain `cargo test` stays hermetic.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used)]

use reqwest::Client;

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// Session cookie value for an already signed-in admin, if provided.
///
/// Sign-in goes through the external identity provider, so the tests cannot
/// establish a session themselves; they reuse one from a browser.
#[must_use]
pub fn session_cookie() -> Option<String> {
    std::env::var("ADMIN_TEST_SESSION").ok()
}

/// HTTP client with a cookie store, pre-loaded with the admin session
/// cookie when `ADMIN_TEST_SESSION` is set.
#[must_use]
pub fn client() -> Client {
    let mut headers = reqwest::header::HeaderMap::new();
    if let Some(session) = session_cookie() {
        let cookie = format!("stockroom_session={session}");
        if let Ok(value) = reqwest::header::HeaderValue::from_str(&cookie) {
            headers.insert(reqwest::header::COOKIE, value);
        }
    }

    Client::builder()
        .cookie_store(true)
        .default_headers(headers)
        .build()
        .expect("Failed to create HTTP client")
}
