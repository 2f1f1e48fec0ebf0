//! # Report State
//!
//! The active report window, the last report fetched for it, and the two
//! chart datasets built from that report. Loading a report replaces all
//! three; nothing from the previous load survives.

use poslite_core::{LineSeries, PieChart, Report, ReportWindow};

#[derive(Debug, Clone, Default)]
pub struct ReportState {
    window: ReportWindow,
    report: Option<Report>,
    pie: PieChart,
    series: LineSeries,
}

impl ReportState {
    pub fn window(&self) -> &ReportWindow {
        &self.window
    }

    pub fn set_window(&mut self, window: ReportWindow) {
        self.window = window;
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    pub fn series(&self) -> &LineSeries {
        &self.series
    }

    /// Swaps in a freshly loaded report and rebuilds both charts from it.
    pub fn replace(&mut self, report: Report) {
        self.pie = PieChart::from_report(&report);
        self.series = LineSeries::from_sales(&report.sales);
        self.report = Some(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(methods: serde_json::Value) -> Report {
        serde_json::from_value(json!({
            "type": "daily", "total_revenue": 10, "total_sales": 1,
            "total_expenses": 0, "net_profit": 10,
            "payment_methods": methods,
            "sales": [{"id": "s1", "total": 10, "created_at": "2024-05-01T09:00:00"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_replace_rebuilds_charts() {
        let mut state = ReportState::default();
        assert!(state.report().is_none());

        state.replace(report(json!({"cash": 10, "card": 5})));
        assert_eq!(state.pie().slices.len(), 2);
        assert_eq!(state.series().points.len(), 1);

        state.replace(report(json!({"transfer": 10})));
        assert_eq!(state.pie().slices.len(), 1);
        assert_eq!(state.pie().slices[0].label, "TRANSFER");
    }
}
