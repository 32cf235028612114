//! Dashboard route: order statistics.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use stockroom_core::format_amount;

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::services::stats::{self, Bucket, DayStat};
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

// =============================================================================
// Response Types
// =============================================================================

/// One time bucket on the wire: order count plus display-formatted revenue.
#[derive(Debug, Serialize)]
pub struct BucketSummary {
    pub count: usize,
    pub revenue: String,
}

impl From<Bucket> for BucketSummary {
    fn from(bucket: Bucket) -> Self {
        Self {
            count: bucket.count,
            revenue: format_amount(bucket.revenue),
        }
    }
}

/// One calendar day of the chart series.
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub count: usize,
    pub revenue: Decimal,
}

impl From<DayStat> for DaySummary {
    fn from(day: DayStat) -> Self {
        Self {
            date: day.date,
            count: day.count,
            revenue: day.revenue,
        }
    }
}

/// The dashboard aggregation on the wire.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: BucketSummary,
    pub this_week: BucketSummary,
    pub this_month: BucketSummary,
    pub by_day: Vec<DaySummary>,
}

/// Aggregate all orders into dashboard statistics as of now.
async fn dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    let stats = stats::aggregate(&orders, Utc::now());

    Ok(Json(DashboardResponse {
        today: stats.today.into(),
        this_week: stats.this_week.into(),
        this_month: stats.this_month.into(),
        by_day: stats.by_day.into_iter().map(Into::into).collect(),
    }))
}
