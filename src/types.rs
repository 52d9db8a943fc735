/// Core data model for inventory usage reports
///
/// Everything here mirrors the wire shapes of the service-management API,
/// which uses camelCase field names and ISO `YYYY-MM-DD` dates. Monetary
/// amounts are decimal throughout; floats never touch money.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One consumption event: a spare part used during a service visit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub service_date: NaiveDate,
    pub vehicle_plate_no: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Cost as recorded at service time. Authoritative even when it differs
    /// from `quantity * unit_price`, since prices change over time.
    pub cost: Decimal,
}

/// One price revision of a component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeRecord {
    pub change_date: NaiveDate,
    pub old_price: Decimal,
    pub new_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Supplier reference attached to a component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRef {
    pub id: i64,
    pub name: String,
}

/// Link row tying a component to a service record it was used in. Only the
/// count of these matters for the component list view.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceComponentUsage {
    pub service_record_id: i64,
    pub quantity: u32,
}

/// Stock position of a component, derived from count and reorder level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    Low,
    Out,
}

/// An inventory component (spare part) as served by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    pub price: Decimal,
    pub stock_count: u32,
    #[serde(default)]
    pub reorder_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_components: Option<Vec<ServiceComponentUsage>>,
}

impl ComponentInfo {
    /// Derive the stock position. Zero is out of stock regardless of the
    /// reorder level; anything at or below the reorder level is low.
    pub fn stock_status(&self) -> StockStatus {
        if self.stock_count == 0 {
            StockStatus::Out
        } else if self.stock_count <= self.reorder_level {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    /// How many service records this component appears in.
    pub fn usage_count(&self) -> usize {
        self.service_components.as_ref().map_or(0, Vec::len)
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.name.as_str())
    }
}

/// Inclusive report range. The constructor normalizes the endpoints, so
/// `start_date <= end_date` holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Build a range from two endpoints, swapping them if given in reverse
    /// order.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        if end_date < start_date {
            DateRange { start_date: end_date, end_date: start_date }
        } else {
            DateRange { start_date, end_date }
        }
    }

    /// Range covering the `days` days leading up to `end_date`.
    pub fn trailing(end_date: NaiveDate, days: i64) -> Self {
        DateRange::new(end_date - chrono::Duration::days(days), end_date)
    }

    /// Span in whole days. Same-day ranges yield zero.
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Everything the usage-report endpoint returns for one component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub component: ComponentInfo,
    /// Absent and empty are different things here: an absent history means
    /// the upstream could not provide one and no statistics are derived,
    /// while an empty one is a real "no usage in this range" answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_history: Option<Vec<UsageRecord>>,
    #[serde(default)]
    pub price_history: Vec<PriceChangeRecord>,
}

impl ReportPayload {
    /// Usage rows for display purposes, treating an absent history as empty.
    pub fn usage_records(&self) -> &[UsageRecord] {
        self.usage_history.as_deref().unwrap_or(&[])
    }
}

/// Derived statistics over a report payload. Averages keep the full
/// division precision; display rounding happens at format time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatistics {
    /// Number of service visits that used the component.
    pub total_usage: u32,
    /// Units consumed across all visits.
    pub total_quantity: u64,
    pub total_cost: Decimal,
    pub average_per_month: Decimal,
    pub average_per_week: Decimal,
    pub average_quantity_per_month: Decimal,
    pub average_cost_per_month: Decimal,
}

/// Workshop-wide counters shown on the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub company_count: u32,
    pub customer_count: u32,
    pub vehicle_count: u32,
    pub technician_count: u32,
    pub component_count: u32,
    pub open_service_count: u32,
    pub monthly_revenue: Decimal,
}

/// A recent service visit, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordSummary {
    pub id: i64,
    pub service_date: NaiveDate,
    pub vehicle_plate_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub total_cost: Decimal,
}

/// A scheduled future service, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingService {
    pub id: i64,
    pub scheduled_date: NaiveDate,
    pub vehicle_plate_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
