//! Order routes.
//!
//! Orders are created by the external checkout flow; this surface only
//! lists them.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/orders", get(list_orders))
}

/// List all orders, newest first.
async fn list_orders(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}
