//! # Settings Commands
//!
//! Settings drive currency formatting everywhere, so a successful save is
//! followed by a reload of the active report; the shell re-renders after
//! every command.

use tracing::{debug, warn};

use crate::commands::report::load_report;
use crate::error::{AppError, AppResult};
use crate::state::App;
use poslite_core::Settings;

/// Fetches settings. On failure the previous (or default) settings stay.
pub async fn load_settings(app: &mut App) {
    debug!("load_settings command");

    match app.backend.settings().get().await {
        Ok(settings) => app.settings = settings,
        Err(err) => warn!(error = %err, "Failed to load settings"),
    }
}

/// Saves settings, adopts the backend's copy, and reloads the report.
pub async fn save_settings(app: &mut App, settings: &Settings) -> AppResult<()> {
    debug!(
        business = %settings.business_name,
        currency = %settings.currency,
        vat_rate = settings.vat_rate,
        "save_settings command"
    );

    match app.backend.settings().save(settings).await {
        Ok(saved) => {
            app.settings = saved;
            app.notices.success("Settings saved successfully!");
        }
        Err(err) => {
            let err = AppError::from(err);
            app.notices
                .error(format!("Failed to save settings: {}", err.message));
            return Err(err);
        }
    }

    let window = app.report.window().clone();
    load_report(app, window).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing;
    use poslite_core::{Currency, Money};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_failure_keeps_defaults() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = testing::app(&server.uri(), dir.path());

        load_settings(&mut app).await;
        assert_eq!(app.settings, Settings::default());
    }

    #[tokio::test]
    async fn test_save_applies_currency_and_reloads_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "settings": {"business_name": "Kiosk", "currency": "EUR",
                             "vat_rate": 19, "user_role": "owner"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/reports/daily"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "report": {"type": "daily", "total_revenue": 5, "total_sales": 1,
                           "total_expenses": 0, "net_profit": 5,
                           "payment_methods": {"cash": 5}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut app = testing::app(&server.uri(), dir.path());
        let draft = Settings {
            business_name: "Kiosk".to_string(),
            currency: Currency::Eur,
            vat_rate: 19.0,
            ..Settings::default()
        };

        save_settings(&mut app, &draft).await.unwrap();
        assert_eq!(app.money(Money::from_cents(500)), "€5.00");
        assert!(app.report.report().is_some());
    }
}
