//! # Reports
//!
//! The pre-aggregated report the backend returns per window, and the two
//! chart datasets derived from it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/reports/weekly                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Report ──┬──► scalar cards: revenue, sale count, expenses, profit      │
//! │           ├──► PieChart::from_report   (revenue by payment method)      │
//! │           └──► LineSeries::from_sales  (revenue per day, last 7 days)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregation itself is server-side; nothing here recomputes totals.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{timestamp, Expense, Sale};

/// Number of trailing dates kept in the revenue series.
pub const SERIES_POINTS: usize = 7;

// =============================================================================
// Report Window
// =============================================================================

/// Named aggregation period. The valid set is defined by the backend; the
/// client only checks that the name is usable as a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportWindow(String);

impl ReportWindow {
    pub fn daily() -> Self {
        ReportWindow("daily".to_string())
    }

    pub fn weekly() -> Self {
        ReportWindow("weekly".to_string())
    }

    pub fn monthly() -> Self {
        ReportWindow("monthly".to_string())
    }

    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "report window".to_string(),
            });
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ValidationError::InvalidFormat {
                field: "report window".to_string(),
                reason: "must be a single word".to_string(),
            });
        }
        Ok(ReportWindow(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ReportWindow {
    fn default() -> Self {
        ReportWindow::daily()
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Report
// =============================================================================

/// Aggregate for one report window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "type", default)]
    pub window: String,

    #[serde(default, with = "timestamp")]
    pub start_date: Option<NaiveDateTime>,

    #[serde(default, with = "timestamp")]
    pub end_date: Option<NaiveDateTime>,

    pub total_revenue: Money,

    pub total_sales: u64,

    pub total_expenses: Money,

    pub net_profit: Money,

    /// Revenue keyed by payment method name.
    #[serde(default)]
    pub payment_methods: BTreeMap<String, Money>,

    #[serde(default)]
    pub sales: Vec<Sale>,

    #[serde(default)]
    pub expenses: Vec<Expense>,
}

// =============================================================================
// Pie Chart
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Method name, uppercased.
    pub label: String,
    pub value: Money,
    /// Fraction of the positive total, 0.0 - 1.0.
    pub share: f64,
}

/// Revenue split by payment method.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn from_report(report: &Report) -> Self {
        let total: i64 = report
            .payment_methods
            .values()
            .map(|m| m.cents().max(0))
            .sum();

        let slices = report
            .payment_methods
            .iter()
            .map(|(method, value)| PieSlice {
                label: method.to_uppercase(),
                value: *value,
                share: if total > 0 {
                    value.cents().max(0) as f64 / total as f64
                } else {
                    0.0
                },
            })
            .collect();

        PieChart { slices }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

// =============================================================================
// Line Series
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub revenue: Money,
}

/// Revenue per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSeries {
    pub points: Vec<SeriesPoint>,
}

impl LineSeries {
    /// Groups sales by date in first-appearance order, sums their totals, and
    /// keeps the last [`SERIES_POINTS`] groups. Sales without a usable
    /// timestamp are skipped.
    pub fn from_sales(sales: &[Sale]) -> Self {
        let mut points: Vec<SeriesPoint> = Vec::new();
        for sale in sales {
            let Some(created_at) = sale.created_at else {
                continue;
            };
            let date = created_at.date();
            match points.iter_mut().find(|p| p.date == date) {
                Some(point) => point.revenue += sale.total,
                None => points.push(SeriesPoint {
                    date,
                    revenue: sale.total,
                }),
            }
        }

        let skip = points.len().saturating_sub(SERIES_POINTS);
        LineSeries {
            points: points.split_off(skip),
        }
    }

    /// Largest value on the axis; the axis always begins at zero.
    pub fn max_revenue(&self) -> Money {
        self.points
            .iter()
            .map(|p| p.revenue)
            .max()
            .unwrap_or_default()
            .max(Money::zero())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sale(id: &str, created_at: &str, total: f64) -> serde_json::Value {
        json!({ "id": id, "created_at": created_at, "total": total, "payment_method": "cash" })
    }

    #[test]
    fn test_report_decodes_backend_shape() {
        let report: Report = serde_json::from_value(json!({
            "type": "weekly",
            "start_date": "2024-05-01T00:00:00",
            "end_date": "2024-05-08T10:00:00.000001",
            "total_revenue": 150.5,
            "total_sales": 3,
            "total_expenses": 20,
            "net_profit": 130.5,
            "payment_methods": { "cash": 100.5, "card": 50 },
            "sales": [sale("s1", "2024-05-02T09:00:00", 100.5)],
            "expenses": []
        }))
        .unwrap();

        assert_eq!(report.window, "weekly");
        assert_eq!(report.total_sales, 3);
        assert_eq!(report.net_profit.cents(), 13050);
        assert_eq!(report.sales.len(), 1);
    }

    #[test]
    fn test_pie_chart_labels_and_shares() {
        let report: Report = serde_json::from_value(json!({
            "total_revenue": 100, "total_sales": 2, "total_expenses": 0, "net_profit": 100,
            "payment_methods": { "cash": 75, "card": 25 }
        }))
        .unwrap();

        let pie = PieChart::from_report(&report);
        assert_eq!(pie.slices.len(), 2);
        let cash = pie.slices.iter().find(|s| s.label == "CASH").unwrap();
        assert!((cash.share - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_pie_chart_empty_when_no_methods() {
        let report: Report = serde_json::from_value(json!({
            "total_revenue": 0, "total_sales": 0, "total_expenses": 0, "net_profit": 0
        }))
        .unwrap();
        assert!(PieChart::from_report(&report).is_empty());
    }

    #[test]
    fn test_series_groups_by_date() {
        let sales: Vec<Sale> = serde_json::from_value(json!([
            sale("a", "2024-05-01T09:00:00", 10.0),
            sale("b", "2024-05-01T17:30:00", 5.5),
            sale("c", "2024-05-02T08:00:00", 2.0),
        ]))
        .unwrap();

        let series = LineSeries::from_sales(&sales);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].revenue.cents(), 1550);
        assert_eq!(series.max_revenue().cents(), 1550);
    }

    #[test]
    fn test_series_keeps_last_seven_dates() {
        let raw: Vec<serde_json::Value> = (1..=10)
            .map(|d| sale(&format!("s{d}"), &format!("2024-05-{d:02}T12:00:00"), d as f64))
            .collect();
        let sales: Vec<Sale> = serde_json::from_value(serde_json::Value::Array(raw)).unwrap();

        let series = LineSeries::from_sales(&sales);
        assert_eq!(series.points.len(), SERIES_POINTS);
        assert_eq!(series.points[0].date, NaiveDate::from_ymd_opt(2024, 5, 4).unwrap());
        assert_eq!(series.points[6].revenue.cents(), 1000);
    }

    #[test]
    fn test_series_skips_sales_without_timestamp() {
        let sales: Vec<Sale> =
            serde_json::from_value(json!([{ "id": "x", "total": 3 }, sale("y", "bad", 4.0)])).unwrap();
        assert!(LineSeries::from_sales(&sales).is_empty());
    }

    #[test]
    fn test_report_window_parse() {
        assert_eq!(ReportWindow::parse(" Weekly ").unwrap(), ReportWindow::weekly());
        assert!(ReportWindow::parse("").is_err());
        assert!(ReportWindow::parse("../admin").is_err());
    }
}
