//! # Settings Repository
//!
//! `GET /api/settings` and `POST /api/settings`. The backend merges the posted
//! object into what it has and echoes the result.

use reqwest::Method;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::ClientResult;
use poslite_core::validation::validate_settings;
use poslite_core::Settings;

const KEY: &str = "settings";

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    backend: Backend,
}

impl SettingsRepository {
    pub fn new(backend: Backend) -> Self {
        SettingsRepository { backend }
    }

    /// Fetches the business settings.
    pub async fn get(&self) -> ClientResult<Settings> {
        debug!("Fetching settings");
        let mut envelope = self.backend.get(KEY).await?;
        envelope.take(KEY)
    }

    /// Saves settings and returns the backend's merged copy.
    pub async fn save(&self, settings: &Settings) -> ClientResult<Settings> {
        validate_settings(settings)?;

        let mut envelope = self.backend.send(Method::POST, KEY, settings).await?;
        let saved: Settings = envelope.take(KEY)?;

        info!(
            business = %saved.business_name,
            currency = %saved.currency,
            vat_rate = saved.vat_rate,
            "Settings saved"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClientConfig;
    use crate::error::ClientError;
    use poslite_core::Currency;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_settings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "settings": {"business_name": "Corner Shop", "currency": "NGN",
                             "vat_rate": 7.5, "user_role": "owner", "logo": null}
            })))
            .mount(&server)
            .await;

        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        let settings = backend.settings().get().await.unwrap();
        assert_eq!(settings.currency, Currency::Ngn);
        assert_eq!(settings.tax_rate().bps(), 750);
    }

    #[tokio::test]
    async fn test_save_settings_posts_and_returns_merged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/settings"))
            .and(body_partial_json(json!({"currency": "EUR", "vat_rate": 20.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "settings": {"business_name": "My Business", "currency": "EUR",
                             "vat_rate": 20.0, "user_role": "owner"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        let settings = Settings {
            currency: Currency::Eur,
            vat_rate: 20.0,
            ..Settings::default()
        };
        let saved = backend.settings().save(&settings).await.unwrap();
        assert_eq!(saved.currency, Currency::Eur);
    }

    #[tokio::test]
    async fn test_save_rejects_out_of_range_vat() {
        let backend = Backend::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let settings = Settings {
            vat_rate: 101.0,
            ..Settings::default()
        };
        assert!(matches!(
            backend.settings().save(&settings).await,
            Err(ClientError::Validation(_))
        ));
    }
}
