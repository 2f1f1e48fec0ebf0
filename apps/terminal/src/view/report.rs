//! # Report View
//!
//! Four scalar cards, the payment-method pie, and the 7-day revenue line,
//! all drawn from [`ReportState`](crate::state::ReportState).

use comfy_table::{Cell, CellAlignment};

use super::{bar, new_table};
use crate::state::App;
use poslite_core::{format_count, LineSeries, PieChart};

pub fn report_view(app: &App) -> String {
    let title = format!("Report: {}", app.report.window());
    let Some(report) = app.report.report() else {
        return format!("{title}\nNo report loaded.");
    };

    let mut cards = new_table(
        app.theme,
        &["Total Revenue", "Total Sales", "Total Expenses", "Net Profit"],
    );
    cards.add_row(vec![
        Cell::new(app.money(report.total_revenue)).set_alignment(CellAlignment::Right),
        Cell::new(format_count(report.total_sales as i64)).set_alignment(CellAlignment::Right),
        Cell::new(app.money(report.total_expenses)).set_alignment(CellAlignment::Right),
        Cell::new(app.money(report.net_profit)).set_alignment(CellAlignment::Right),
    ]);

    format!(
        "{title}\n{cards}\n\nRevenue by payment method\n{}\n\nDaily revenue\n{}",
        pie_chart(app, app.report.pie()),
        line_chart(app, app.report.series()),
    )
}

/// One labelled bar per payment method, sized by share of revenue.
pub fn pie_chart(app: &App, pie: &PieChart) -> String {
    if pie.is_empty() {
        return "No sales in this period.".to_string();
    }

    let label_width = pie.slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
    pie.slices
        .iter()
        .map(|slice| {
            format!(
                "{:<label_width$}  {:<width$}  {:>5.1}%  {}",
                slice.label,
                bar(slice.share),
                slice.share * 100.0,
                app.money(slice.value),
                width = super::BAR_WIDTH,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row per date; bars are scaled against the largest day, from zero.
pub fn line_chart(app: &App, series: &LineSeries) -> String {
    if series.is_empty() {
        return "No sales in this period.".to_string();
    }

    let max = series.max_revenue().cents();
    series
        .points
        .iter()
        .map(|point| {
            let fraction = if max > 0 {
                point.revenue.cents() as f64 / max as f64
            } else {
                0.0
            };
            format!(
                "{}  {:<width$}  {}",
                point.date.format("%Y-%m-%d"),
                bar(fraction),
                app.money(point.revenue),
                width = super::BAR_WIDTH,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
