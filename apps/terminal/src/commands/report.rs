//! # Report Commands

use tracing::{debug, warn};

use crate::state::App;
use poslite_core::ReportWindow;

/// Makes `window` active and fetches its report.
///
/// On success the report and both charts are replaced. On failure the
/// previous report stays on screen and the failure is logged.
pub async fn load_report(app: &mut App, window: ReportWindow) {
    debug!(window = %window, "load_report command");

    app.report.set_window(window.clone());
    match app.backend.reports().get(&window).await {
        Ok(report) => app.report.replace(report),
        Err(err) => warn!(window = %window, error = %err, "Failed to load report"),
    }
}
