//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (probes the database)
//!
//! # Auth (external OAuth provider)
//! GET  /auth/login              - Redirect to the identity provider
//! GET  /auth/callback           - OAuth callback; establishes the session
//! POST /auth/logout             - Sign out
//!
//! # Admins
//! GET    /api/admins            - List admins
//! POST   /api/admins            - Create admin
//! PUT    /api/admins/{id}       - Update admin email
//! DELETE /api/admins/{id}       - Delete admin (refused for the last one)
//!
//! # Categories
//! GET    /api/categories        - List categories
//! POST   /api/categories        - Create category
//! PUT    /api/categories/{id}   - Update category
//! DELETE /api/categories/{id}   - Delete category (product refs nullified)
//!
//! # Products
//! GET    /api/products          - List products (?category={id} filters)
//! POST   /api/products          - Create product
//! GET    /api/products/{id}     - Fetch one product
//! PUT    /api/products/{id}     - Update product
//! DELETE /api/products/{id}     - Delete product
//!
//! # Orders (read-only; written by the external checkout)
//! GET  /api/orders              - List orders
//!
//! # Settings
//! GET  /api/settings?name={key} - Read one setting (absent reads as null)
//! PUT  /api/settings            - Upsert one setting
//!
//! # Dashboard
//! GET  /api/dashboard           - Order statistics (buckets + per-day series)
//!
//! # Upload
//! POST /api/upload              - Multipart image upload, returns links
//! ```

pub mod admins;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the complete router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(admins::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(settings::router())
        .merge(dashboard::router())
        .merge(upload::router())
}
