//! Usage statistics aggregation
//!
//! Pure derivation of summary statistics from a report payload and its
//! date range. No formatting and no I/O happen here; callers decide how
//! the numbers are displayed.

use crate::types::{DateRange, ReportPayload, UsageStatistics};
use rust_decimal::Decimal;

/// Days in the fixed-length month used for period averaging. Deliberately
/// not calendar-aware: a "month" is always 30 days, so regenerated reports
/// match the averages of previously shared ones. Averages skew slightly
/// for 28/29/31-day calendar months.
const DAYS_PER_MONTH: i64 = 30;

const DAYS_PER_WEEK: i64 = 7;

/// Compute usage statistics over a payload's usage history.
///
/// Returns `None` when there is no payload or when the payload carries no
/// usage history at all. An empty history is a real answer and produces
/// all-zero statistics.
///
/// Totals cover every record in the history as the upstream scoped it; the
/// range only drives the period divisors. Cost totals sum the recorded
/// `cost` fields, so historical prices stay authoritative.
///
/// Same-day ranges would make the period divisors zero; those degrade to a
/// divisor of one, so the averages collapse to the raw totals instead of
/// dividing by zero.
pub fn compute_statistics(payload: Option<&ReportPayload>, range: &DateRange) -> Option<UsageStatistics> {
    let history = payload?.usage_history.as_ref()?;

    let total_usage = history.len() as u32;
    let total_quantity: u64 = history.iter().map(|r| u64::from(r.quantity)).sum();
    let total_cost: Decimal = history.iter().map(|r| r.cost).sum();

    let total_days = range.total_days();
    let months = Decimal::from(total_days) / Decimal::from(DAYS_PER_MONTH);
    let weeks = Decimal::from(total_days) / Decimal::from(DAYS_PER_WEEK);
    let month_divisor = if months.is_zero() { Decimal::ONE } else { months };
    let week_divisor = if weeks.is_zero() { Decimal::ONE } else { weeks };

    Some(UsageStatistics {
        total_usage,
        total_quantity,
        total_cost,
        average_per_month: Decimal::from(total_usage) / month_divisor,
        average_per_week: Decimal::from(total_usage) / week_divisor,
        average_quantity_per_month: Decimal::from(total_quantity) / month_divisor,
        average_cost_per_month: total_cost / month_divisor,
    })
}
