//! Order statistics for the dashboard.
//!
//! Pure calendar arithmetic over an already-fetched order list. "Now" is an
//! explicit argument everywhere so the bucketing is deterministic under test.
//!
//! Buckets:
//! - **today**: orders placed within the last 24 hours (rolling, not
//!   calendar-today)
//! - **this week**: Monday 00:00 of the current week up to, exclusively,
//!   the following Monday 00:00 - so all of Sunday counts
//! - **this month**: the calendar month of "now"
//!
//! Revenue is the sum over line items of quantity x unit price, computed in
//! [`Decimal`]. The per-day series covers every calendar day of the current
//! month and rounds revenue to two decimal places for charting.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::models::Order;

/// Order count and revenue for one time bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Number of orders in the bucket.
    pub count: usize,
    /// Total revenue of the bucket in currency units.
    pub revenue: Decimal,
}

/// Order count and revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStat {
    /// The calendar day.
    pub date: NaiveDate,
    /// Number of orders placed that day.
    pub count: usize,
    /// Revenue that day, rounded to two decimal places.
    pub revenue: Decimal,
}

/// The full dashboard aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Orders placed within the last 24 hours.
    pub today: Bucket,
    /// Orders placed this week (Monday 00:00 through Sunday 24:00).
    pub this_week: Bucket,
    /// Orders placed this calendar month.
    pub this_month: Bucket,
    /// Per-day series for every day of the current month.
    pub by_day: Vec<DayStat>,
}

/// Aggregate an order list into dashboard statistics as of `now`.
#[must_use]
pub fn aggregate(orders: &[Order], now: DateTime<Utc>) -> DashboardStats {
    let day_ago = now - Duration::hours(24);
    let (week_start, week_end) = week_bounds(now);
    let (month_start, month_end) = month_bounds(now);

    let today = bucket(orders.iter().filter(|o| o.created_at > day_ago));
    let this_week = bucket(
        orders
            .iter()
            .filter(|o| o.created_at >= week_start && o.created_at < week_end),
    );
    let this_month = bucket(
        orders
            .iter()
            .filter(|o| o.created_at >= month_start && o.created_at < month_end),
    );

    let by_day = days_of_month(now)
        .map(|date| {
            let on_day = orders
                .iter()
                .filter(|o| o.created_at.date_naive() == date)
                .collect::<Vec<_>>();
            DayStat {
                date,
                count: on_day.len(),
                revenue: on_day
                    .iter()
                    .map(|o| o.total())
                    .sum::<Decimal>()
                    .round_dp(2),
            }
        })
        .collect();

    DashboardStats {
        today,
        this_week,
        this_month,
        by_day,
    }
}

/// Half-open bounds of the current week: Monday 00:00 up to the following
/// Monday 00:00.
#[must_use]
pub fn week_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(7))
}

/// Half-open bounds of the current calendar month.
#[must_use]
pub fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let start = first_of_month(date.year(), date.month());
    let end = if date.month() == 12 {
        first_of_month(date.year() + 1, 1)
    } else {
        first_of_month(date.year(), date.month() + 1)
    };
    (
        start.and_time(NaiveTime::MIN).and_utc(),
        end.and_time(NaiveTime::MIN).and_utc(),
    )
}

/// Every calendar day of the month containing `now`, in order.
fn days_of_month(now: DateTime<Utc>) -> impl Iterator<Item = NaiveDate> {
    let (start, end) = month_bounds(now);
    let mut day = Some(start.date_naive());
    let last = end.date_naive();
    std::iter::from_fn(move || {
        let current = day.filter(|d| *d < last)?;
        day = current.succ_opt();
        Some(current)
    })
}

/// The 1st of a month. The fallback is unreachable for valid years.
fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn bucket<'o>(orders: impl Iterator<Item = &'o Order>) -> Bucket {
    let mut count = 0;
    let mut revenue = Decimal::ZERO;
    for order in orders {
        count += 1;
        revenue += order.total();
    }
    Bucket { count, revenue }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use stockroom_core::{Cents, OrderId};

    use crate::models::LineItem;

    fn order(id: i32, created_at: DateTime<Utc>, items: &[(u32, i64)]) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: "Test Customer".to_string(),
            email: "customer@example.com".to_string(),
            street_address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            country: "US".to_string(),
            line_items: items
                .iter()
                .map(|&(quantity, unit_cents)| LineItem {
                    product_name: "widget".to_string(),
                    quantity,
                    unit_amount: Cents::new(unit_cents).unwrap(),
                })
                .collect(),
            paid: true,
            created_at,
        }
    }

    /// Wednesday, 2026-03-18 15:00 UTC.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 18, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_week_bounds_monday_through_sunday() {
        let (start, end) = week_bounds(now());
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 23, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_week_bounds_on_a_sunday() {
        // Sunday belongs to the week that started the previous Monday.
        let sunday = Utc.with_ymd_and_hms(2026, 3, 22, 10, 0, 0).unwrap();
        let (start, end) = week_bounds(sunday);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 23, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_bounds_december_rolls_over() {
        let december = Utc.with_ymd_and_hms(2026, 12, 5, 0, 0, 0).unwrap();
        let (start, end) = month_bounds(december);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_today_bucket_is_a_rolling_24_hours() {
        let orders = vec![
            order(1, now() - Duration::hours(23), &[(1, 100)]),
            order(2, now() - Duration::hours(25), &[(1, 100)]),
        ];

        let stats = aggregate(&orders, now());
        assert_eq!(stats.today.count, 1);
        assert_eq!(stats.today.revenue, Decimal::new(100, 2));
    }

    #[test]
    fn test_week_bucket_includes_all_of_sunday() {
        let sunday_evening = Utc.with_ymd_and_hms(2026, 3, 22, 20, 0, 0).unwrap();
        let next_monday = Utc.with_ymd_and_hms(2026, 3, 23, 0, 0, 0).unwrap();
        let previous_sunday = Utc.with_ymd_and_hms(2026, 3, 15, 23, 0, 0).unwrap();

        let orders = vec![
            order(1, sunday_evening, &[(1, 100)]),
            order(2, next_monday, &[(1, 100)]),
            order(3, previous_sunday, &[(1, 100)]),
        ];

        let stats = aggregate(&orders, now());
        assert_eq!(stats.this_week.count, 1);
    }

    #[test]
    fn test_revenue_sums_quantity_times_unit_price() {
        // 2 x 10.00 + 1 x 5.00 = 25.00
        let orders = vec![order(1, now(), &[(2, 1000), (1, 500)])];

        let stats = aggregate(&orders, now());
        assert_eq!(stats.today.revenue, Decimal::new(2500, 2));
        assert_eq!(stats.this_week.revenue, Decimal::new(2500, 2));
        assert_eq!(stats.this_month.revenue, Decimal::new(2500, 2));
    }

    #[test]
    fn test_month_bucket_excludes_neighboring_months() {
        let orders = vec![
            order(1, Utc.with_ymd_and_hms(2026, 2, 28, 23, 59, 59).unwrap(), &[(1, 100)]),
            order(2, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(), &[(1, 100)]),
            order(3, Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(), &[(1, 100)]),
        ];

        let stats = aggregate(&orders, now());
        assert_eq!(stats.this_month.count, 1);
    }

    #[test]
    fn test_by_day_covers_every_day_of_the_month() {
        let stats = aggregate(&[], now());
        assert_eq!(stats.by_day.len(), 31);
        assert_eq!(
            stats.by_day.first().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(
            stats.by_day.last().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
        );
        assert!(stats.by_day.iter().all(|d| d.count == 0));
    }

    #[test]
    fn test_by_day_counts_and_rounds_revenue() {
        let march_5 = Utc.with_ymd_and_hms(2026, 3, 5, 9, 30, 0).unwrap();
        let orders = vec![
            // 3 x 3.33 = 9.99, plus 1 x 0.05: 10.04 total on the 5th
            order(1, march_5, &[(3, 333)]),
            order(2, march_5 + Duration::hours(2), &[(1, 5)]),
        ];

        let stats = aggregate(&orders, now());
        let day = stats
            .by_day
            .iter()
            .find(|d| d.date == NaiveDate::from_ymd_opt(2026, 3, 5).unwrap())
            .unwrap();
        assert_eq!(day.count, 2);
        assert_eq!(day.revenue, Decimal::new(1004, 2));
    }

    #[test]
    fn test_empty_orders_produce_zero_buckets() {
        let stats = aggregate(&[], now());
        assert_eq!(stats.today, Bucket { count: 0, revenue: Decimal::ZERO });
        assert_eq!(stats.this_week.count, 0);
        assert_eq!(stats.this_month.count, 0);
    }
}
