//! # Report Repository
//!
//! `GET /api/reports/:window`. Aggregation happens on the backend.

use tracing::debug;

use crate::backend::Backend;
use crate::error::ClientResult;
use poslite_core::{Report, ReportWindow};

#[derive(Debug, Clone)]
pub struct ReportRepository {
    backend: Backend,
}

impl ReportRepository {
    pub fn new(backend: Backend) -> Self {
        ReportRepository { backend }
    }

    /// Fetches the aggregate for one window.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let report = backend.reports().get(&ReportWindow::weekly()).await?;
    /// ```
    pub async fn get(&self, window: &ReportWindow) -> ClientResult<Report> {
        debug!(window = %window, "Fetching report");
        let mut envelope = self.backend.get(&format!("reports/{window}")).await?;
        envelope.take("report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClientConfig;
    use crate::error::ClientError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/reports/weekly"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "report": {
                    "type": "weekly",
                    "start_date": "2024-04-24T10:00:00", "end_date": "2024-05-01T10:00:00",
                    "total_revenue": 1234.5, "total_sales": 12, "total_expenses": 200,
                    "net_profit": 1034.5,
                    "payment_methods": {"cash": 1000, "transfer": 234.5},
                    "sales": [], "expenses": []
                }
            })))
            .mount(&server)
            .await;

        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        let report = backend.reports().get(&ReportWindow::weekly()).await.unwrap();
        assert_eq!(report.total_sales, 12);
        assert_eq!(report.net_profit.cents(), 103450);
        assert_eq!(report.payment_methods.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_window_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/reports/yearly"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"success": false, "message": "Invalid report type"})),
            )
            .mount(&server)
            .await;

        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        let window = ReportWindow::parse("yearly").unwrap();
        let err = backend.reports().get(&window).await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected { .. }));
    }
}
