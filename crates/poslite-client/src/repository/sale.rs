//! # Sale Repository
//!
//! `POST /api/sales`. The backend assigns the id and timestamp and
//! decrements stock for every line; the client only reads the result.

use reqwest::Method;
use tracing::info;

use crate::backend::Backend;
use crate::error::ClientResult;
use poslite_core::{Sale, SaleRequest};

#[derive(Debug, Clone)]
pub struct SaleRepository {
    backend: Backend,
}

impl SaleRepository {
    pub fn new(backend: Backend) -> Self {
        SaleRepository { backend }
    }

    /// Submits a completed cart and returns the recorded sale.
    pub async fn create(&self, request: &SaleRequest) -> ClientResult<Sale> {
        let mut envelope = self.backend.send(Method::POST, "sales", request).await?;
        let sale: Sale = envelope.take("sale")?;

        info!(
            sale_id = %sale.id,
            total_cents = sale.total.cents(),
            items = sale.items.len(),
            payment = %sale.payment_method,
            "Sale recorded"
        );
        Ok(sale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClientConfig;
    use poslite_core::{CartLine, Money, PaymentMethod};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_sale_sends_major_units() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sales"))
            .and(body_partial_json(json!({
                "items": [{"product_id": "p1", "name": "Mouse", "price": 25.0, "quantity": 2}],
                "subtotal": 50.0,
                "vat": 5.0,
                "total": 55.0,
                "payment_method": "card"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "sale": {
                    "id": "9f1c2d3e-aaaa-bbbb-cccc-000000000000",
                    "items": [{"product_id": "p1", "name": "Mouse", "price": 25.0, "quantity": 2}],
                    "subtotal": 50.0, "vat": 5.0, "total": 55.0, "payment_method": "card",
                    "created_at": "2024-05-01T13:45:10.123456"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        let request = SaleRequest {
            items: vec![CartLine {
                product_id: "p1".to_string(),
                name: "Mouse".to_string(),
                price: Money::from_cents(2500),
                quantity: 2,
            }],
            subtotal: Money::from_cents(5000),
            vat: Money::from_cents(500),
            total: Money::from_cents(5500),
            payment_method: PaymentMethod::Card,
        };

        let sale = backend.sales().create(&request).await.unwrap();
        assert_eq!(sale.receipt_number(), "9f1c2d3e");
        assert_eq!(sale.total.cents(), 5500);
        assert!(sale.created_at.is_some());
    }
}
