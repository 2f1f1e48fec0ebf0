//! # Commands Module
//!
//! Handlers the shell and CLI call. Each takes `&mut App`, talks to the
//! backend where needed, and leaves the state ready to render.
//!
//! ## Handler Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Handlers                                     │
//! │                                                                         │
//! │  CART (cart.rs)                  RECORDS (records.rs)                   │
//! │  ─────────────────               ─────────────────────                  │
//! │  • add_to_cart                   • load_records::<T>                    │
//! │  • adjust_cart                   • save_record::<T>                     │
//! │  • clear_cart                    • remove_record::<T>                   │
//! │  • complete_sale                                                        │
//! │                                                                         │
//! │  SETTINGS (settings.rs)          REPORT (report.rs)                     │
//! │  ─────────────────               ─────────────────────                  │
//! │  • load_settings                 • load_report                          │
//! │  • save_settings                                                        │
//! │                                                                         │
//! │  THEME (theme.rs)                                                       │
//! │  • toggle_theme                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Tiers
//! - Reads (`load_*`): logged and swallowed; the cache keeps what it had.
//! - Writes: an error banner plus `Err(AppError)`; local state is untouched.

pub mod cart;
pub mod records;
pub mod report;
pub mod settings;
pub mod theme;

use tracing::{info, warn};

use crate::state::App;
use poslite_core::{Customer, Expense, Product, ReportWindow};

/// Initial load: settings, the three caches, and the daily report.
///
/// An unreachable backend raises a warning banner; the loads still run so
/// each cache logs its own failure.
pub async fn bootstrap(app: &mut App) {
    info!(backend = %app.backend.base_url(), "Loading data");

    if !app.backend.health_check().await {
        warn!(backend = %app.backend.base_url(), "Backend is not reachable");
        app.notices
            .warning(format!("Cannot reach the backend at {}", app.backend.base_url()));
    }

    settings::load_settings(app).await;
    records::load_records::<Product>(app).await;
    records::load_records::<Customer>(app).await;
    records::load_records::<Expense>(app).await;
    report::load_report(app, ReportWindow::daily()).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{testing, NoticeKind};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_bootstrap_warns_when_backend_is_down() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = testing::app("http://127.0.0.1:9", dir.path());

        bootstrap(&mut app).await;

        let notice = app.notices.latest().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert!(notice.text.starts_with("Cannot reach the backend"));
        assert!(app.products.records().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_quiet_when_backend_answers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "settings": {"business_name": "Kiosk", "currency": "USD",
                             "vat_rate": 5, "user_role": "owner"}
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut app = testing::app(&server.uri(), dir.path());

        bootstrap(&mut app).await;
        assert_eq!(app.settings.business_name, "Kiosk");
        assert!(app.notices.latest().is_none());
    }
}
