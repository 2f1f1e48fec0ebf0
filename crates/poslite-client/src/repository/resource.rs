//! # CRUD Resources
//!
//! Products, customers and expenses share one REST shape, so they share one
//! repository. What differs per record type lives in the [`Resource`] impls
//! at the bottom of this file.
//!
//! | Record   | Collection   | Item key   | PUT |
//! |----------|--------------|------------|-----|
//! | Product  | `products`   | `product`  | yes |
//! | Customer | `customers`  | `customer` | yes |
//! | Expense  | `expenses`   | `expense`  | no  |

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::{ClientError, ClientResult};
use poslite_core::validation::{
    validate_customer, validate_expense, validate_product, validate_record_id, ValidationResult,
};
use poslite_core::{Customer, Expense, Product};

// =============================================================================
// Resource Trait
// =============================================================================

/// A backend-owned record with list/create/update/delete endpoints.
pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync {
    /// Path segment and list payload key (`products`).
    const COLLECTION: &'static str;

    /// Single-record payload key (`product`).
    const ITEM: &'static str;

    /// Human label for banners and logs (`Product`).
    const LABEL: &'static str;

    /// Whether the backend accepts `PUT /api/{collection}/:id`.
    const UPDATABLE: bool = true;

    /// Backend identifier, `None` until the record has been created.
    fn record_id(&self) -> Option<&str>;

    /// Name shown in tables and confirmation prompts.
    fn display_name(&self) -> &str;

    /// Local checks run before any request.
    fn validate(&self) -> ValidationResult<()>;
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for one CRUD resource.
///
/// ## Usage
/// ```rust,ignore
/// let repo = backend.customers();
/// let all = repo.list().await?;
/// let saved = repo.save(&customer).await?;
/// repo.delete(saved.id.as_deref().unwrap_or_default()).await?;
/// ```
pub struct ResourceRepository<R> {
    backend: Backend,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceRepository<R> {
    fn clone(&self) -> Self {
        ResourceRepository {
            backend: self.backend.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRepository")
            .field("collection", &R::COLLECTION)
            .finish()
    }
}

impl<R: Resource> ResourceRepository<R> {
    pub fn new(backend: Backend) -> Self {
        ResourceRepository {
            backend,
            _record: PhantomData,
        }
    }

    /// Fetches the whole collection.
    pub async fn list(&self) -> ClientResult<Vec<R>> {
        debug!(collection = R::COLLECTION, "Listing records");
        let mut envelope = self.backend.get(R::COLLECTION).await?;
        envelope.take(R::COLLECTION)
    }

    /// Creates a record. The backend assigns `id` and `created_at`.
    pub async fn create(&self, record: &R) -> ClientResult<R> {
        record.validate()?;

        let mut envelope = self
            .backend
            .send(Method::POST, R::COLLECTION, record)
            .await?;
        let created: R = envelope.take(R::ITEM)?;

        info!(
            resource = R::LABEL,
            id = created.record_id().unwrap_or_default(),
            "Record created"
        );
        Ok(created)
    }

    /// Replaces the fields of an existing record.
    pub async fn update(&self, record: &R) -> ClientResult<R> {
        if !R::UPDATABLE {
            return Err(ClientError::Unsupported {
                resource: R::LABEL,
                operation: "edited",
            });
        }
        let id = record.record_id().unwrap_or_default();
        validate_record_id(id)?;
        record.validate()?;

        let path = format!("{}/{}", R::COLLECTION, id);
        let mut envelope = self.backend.send(Method::PUT, &path, record).await?;
        let updated: R = envelope.take(R::ITEM)?;

        info!(resource = R::LABEL, id = %id, "Record updated");
        Ok(updated)
    }

    /// Creates when the record has no identifier, updates otherwise.
    pub async fn save(&self, record: &R) -> ClientResult<R> {
        match record.record_id() {
            Some(id) if !id.trim().is_empty() => self.update(record).await,
            _ => self.create(record).await,
        }
    }

    /// Deletes a record by identifier.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        validate_record_id(id)?;

        let path = format!("{}/{}", R::COLLECTION, id);
        self.backend.delete(&path).await?;

        info!(resource = R::LABEL, id = %id, "Record deleted");
        Ok(())
    }
}

// =============================================================================
// Resource Impls
// =============================================================================

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const ITEM: &'static str = "product";
    const LABEL: &'static str = "Product";

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_product(self)
    }
}

impl Resource for Customer {
    const COLLECTION: &'static str = "customers";
    const ITEM: &'static str = "customer";
    const LABEL: &'static str = "Customer";

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_customer(self)
    }
}

impl Resource for Expense {
    const COLLECTION: &'static str = "expenses";
    const ITEM: &'static str = "expense";
    const LABEL: &'static str = "Expense";
    const UPDATABLE: bool = false;

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_expense(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClientConfig;
    use poslite_core::Money;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, Backend) {
        let server = MockServer::start().await;
        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        (server, backend)
    }

    fn customer(id: Option<&str>) -> Customer {
        Customer {
            id: id.map(str::to_string),
            name: "Ada".to_string(),
            phone: "555-0100".to_string(),
            balance: Money::zero(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_products() {
        let (server, backend) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "products": [{
                    "id": "p1", "name": "Mouse", "category": "Electronics", "barcode": "",
                    "cost_price": 10, "sale_price": "25.00", "quantity": 5,
                    "created_at": "2024-05-01T10:00:00.123456"
                }]
            })))
            .mount(&server)
            .await;

        let products = backend.products().list().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].sale_price.cents(), 2500);
        assert_eq!(products[0].barcode, None);
    }

    #[tokio::test]
    async fn test_save_without_id_posts() {
        let (server, backend) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/customers"))
            .and(body_partial_json(json!({"name": "Ada", "phone": "555-0100"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "customer": {"id": "c1", "name": "Ada", "phone": "555-0100", "balance": 0,
                             "created_at": "2024-05-01T10:00:00"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let saved = backend.customers().save(&customer(None)).await.unwrap();
        assert_eq!(saved.id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_save_with_id_puts() {
        let (server, backend) = setup().await;
        Mock::given(method("PUT"))
            .and(path("/api/customers/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "customer": {"id": "c1", "name": "Ada", "phone": "555-0100", "balance": 12.5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let saved = backend.customers().save(&customer(Some("c1"))).await.unwrap();
        assert_eq!(saved.balance.cents(), 1250);
    }

    #[tokio::test]
    async fn test_update_not_found_is_rejected() {
        let (server, backend) = setup().await;
        Mock::given(method("PUT"))
            .and(path("/api/customers/gone"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"success": false, "message": "Customer not found"})),
            )
            .mount(&server)
            .await;

        let err = backend.customers().update(&customer(Some("gone"))).await.unwrap_err();
        assert_eq!(err.to_string(), "Customer not found");
    }

    #[tokio::test]
    async fn test_expense_update_is_unsupported() {
        let (server, backend) = setup().await;
        let expense = Expense {
            id: Some("e1".to_string()),
            title: "Rent".to_string(),
            category: "rent".to_string(),
            amount: Money::from_cents(100_00),
            created_at: None,
        };

        let err = backend.expenses().save(&expense).await.unwrap_err();
        assert!(matches!(err, ClientError::Unsupported { .. }));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_record_never_reaches_backend() {
        let (server, backend) = setup().await;
        let mut bad = customer(None);
        bad.name = "  ".to_string();

        let err = backend.customers().create(&bad).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (server, backend) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/expenses/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        backend.expenses().delete("e1").await.unwrap();
        assert!(backend.expenses().delete("a/b").await.is_err());
    }
}
