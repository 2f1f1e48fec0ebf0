//! # Domain Types
//!
//! Records mirrored from the backend. The backend owns all of them; the
//! client only keeps replaceable copies.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name/category  │   │  name/phone     │   │  title/category │       │
//! │  │  cost/sale      │   │  balance        │   │  amount         │       │
//! │  │  quantity       │   └─────────────────┘   │  created_at     │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Settings     │   │      Sale       │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  business_name  │   │  id, created_at │   │  Cash           │       │
//! │  │  currency       │   │  items (lines)  │   │  Card           │       │
//! │  │  vat_rate (%)   │   │  subtotal/vat   │   │  Transfer       │       │
//! │  │  user_role      │   │  total          │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is `None` only for records that have not been created yet; the
//! backend assigns it (and `created_at`) on create.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cart::CartLine;
use crate::money::{Currency, Money};

// =============================================================================
// Tax Rate
// =============================================================================

/// VAT rate in basis points (1 bp = 0.01%).
///
/// Settings carry the rate as a percentage (`7.5`); it is converted once so
/// the cart math stays in integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage. Negative and non-finite input
    /// clamp to zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return TaxRate(0);
        }
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub category: String,

    /// Empty strings from the edit form are treated as "no barcode".
    #[serde(default, deserialize_with = "non_empty")]
    pub barcode: Option<String>,

    pub cost_price: Money,

    pub sale_price: Money,

    /// Quantity on hand. `null`, `"12"` and `12.0` are accepted.
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: i64,

    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Product {
    /// Returns the identifier, or `""` for unsaved products.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Case-insensitive match on name or category.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.category.to_lowercase().contains(&needle)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record. The balance is display-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub balance: Money,

    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

// =============================================================================
// Expense
// =============================================================================

/// Category preselected on a fresh expense form.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "utilities";

/// A business expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(default = "default_expense_category")]
    pub category: String,

    pub amount: Money,

    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_expense_category() -> String {
    DEFAULT_EXPENSE_CATEGORY.to_string()
}

// =============================================================================
// Settings
// =============================================================================

/// Business settings shared by every renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub business_name: String,

    pub currency: Currency,

    /// VAT percentage (`7.5` = 7.5%). `null` reads as 0, `"7.5"` as 7.5.
    #[serde(default, deserialize_with = "lenient::percentage")]
    pub vat_rate: f64,

    pub user_role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Settings {
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_percentage(self.vat_rate)
    }

    /// Formats an amount in the configured currency.
    pub fn format_money(&self, amount: Money) -> String {
        self.currency.format(amount)
    }
}

impl Default for Settings {
    /// Matches what the backend seeds for a new store.
    fn default() -> Self {
        Settings {
            business_name: "My Business".to_string(),
            currency: Currency::Usd,
            vat_rate: 0.0,
            user_role: "owner".to_string(),
            logo: None,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    /// Anything the backend knows that this client does not.
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Transfer];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other => "other",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// The body posted to create a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub vat: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

/// A sale as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,

    #[serde(default)]
    pub items: Vec<CartLine>,

    #[serde(default)]
    pub subtotal: Money,

    #[serde(default)]
    pub vat: Money,

    #[serde(default)]
    pub total: Money,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Sale {
    /// Short receipt number: the first 8 characters of the sale id.
    pub fn receipt_number(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

// =============================================================================
// Serde Helpers
// =============================================================================

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Numbers older backend rows store as `null` or text.
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// Whole count. Fractional values are rejected.
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let parsed = match Option::<RawNumber>::deserialize(deserializer)? {
            None => Some(0),
            Some(RawNumber::Int(n)) => Some(n),
            Some(RawNumber::Float(f)) => whole(f),
            Some(RawNumber::Text(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
        };
        parsed.ok_or_else(|| D::Error::custom("quantity is not a whole number"))
    }

    pub fn percentage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let parsed = match Option::<RawNumber>::deserialize(deserializer)? {
            None => Some(0.0),
            Some(RawNumber::Int(n)) => Some(n as f64),
            Some(RawNumber::Float(f)) => Some(f),
            Some(RawNumber::Text(s)) => s.trim().parse::<f64>().ok(),
        };
        parsed
            .filter(|f| f.is_finite())
            .ok_or_else(|| D::Error::custom("vat_rate is not a number"))
    }

    fn whole(f: f64) -> Option<i64> {
        (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e18).then_some(f as i64)
    }
}

/// Backend timestamps: ISO-8601, usually without an offset.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    /// Parses `2024-05-01T13:45:10.123456`, with or without an offset.
    /// Offset-bearing values keep their wall-clock time.
    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        NaiveDateTime::parse_from_str(value, FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
    }

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Unparseable timestamps decode as `None` rather than failing the record.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(7.5).bps(), 750);
        assert_eq!(TaxRate::from_percentage(0.0), TaxRate::zero());
        assert_eq!(TaxRate::from_percentage(-3.0), TaxRate::zero());
        assert_eq!(TaxRate::from_percentage(f64::NAN), TaxRate::zero());
    }

    #[test]
    fn test_product_decodes_backend_shape() {
        let product: Product = serde_json::from_value(json!({
            "id": "a1",
            "name": "Laptop",
            "category": "Electronics",
            "barcode": "",
            "cost_price": 800,
            "sale_price": 1200.5,
            "quantity": 15,
            "created_at": "2024-05-01T13:45:10.123456"
        }))
        .unwrap();

        assert_eq!(product.id(), "a1");
        assert_eq!(product.barcode, None);
        assert_eq!(product.sale_price.cents(), 120050);
        assert!(product.created_at.is_some());
        assert!(product.in_stock());
    }

    #[test]
    fn test_new_product_serializes_without_id() {
        let product = Product {
            id: None,
            name: "Mug".to_string(),
            category: "Accessories".to_string(),
            barcode: None,
            cost_price: Money::from_cents(300),
            sale_price: Money::from_cents(1000),
            quantity: 100,
            created_at: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["sale_price"], json!(10.0));
    }

    #[test]
    fn test_product_matches_name_or_category() {
        let product: Product = serde_json::from_value(json!({
            "id": "a1", "name": "Coffee Mug", "category": "Accessories",
            "cost_price": 3, "sale_price": 10, "quantity": 1
        }))
        .unwrap();
        assert!(product.matches("MUG"));
        assert!(product.matches("access"));
        assert!(!product.matches("laptop"));
    }

    #[test]
    fn test_product_quantity_tolerates_loose_shapes() {
        let decode = |quantity: serde_json::Value| {
            serde_json::from_value::<Product>(json!({
                "id": "a1", "name": "Mug", "cost_price": 3, "sale_price": 10,
                "quantity": quantity
            }))
            .map(|p| p.quantity)
        };

        assert_eq!(decode(json!(null)).unwrap(), 0);
        assert_eq!(decode(json!("12")).unwrap(), 12);
        assert_eq!(decode(json!(" 7 ")).unwrap(), 7);
        assert_eq!(decode(json!(12.0)).unwrap(), 12);
        assert_eq!(decode(json!("3.0")).unwrap(), 3);
        assert!(decode(json!(2.5)).is_err());
        assert!(decode(json!("many")).is_err());

        let missing: Product = serde_json::from_value(json!({
            "id": "a1", "name": "Mug", "cost_price": 3, "sale_price": 10
        }))
        .unwrap();
        assert_eq!(missing.quantity, 0);
        assert!(!missing.in_stock());
    }

    #[test]
    fn test_settings_vat_rate_tolerates_loose_shapes() {
        let decode = |vat_rate: serde_json::Value| {
            serde_json::from_value::<Settings>(json!({
                "business_name": "Shop", "currency": "USD",
                "vat_rate": vat_rate, "user_role": "admin"
            }))
            .map(|s| s.vat_rate)
        };

        assert_eq!(decode(json!(null)).unwrap(), 0.0);
        assert_eq!(decode(json!("7.5")).unwrap(), 7.5);
        assert_eq!(decode(json!(10)).unwrap(), 10.0);
        assert!(decode(json!("ten")).is_err());
        assert!(decode(json!("inf")).is_err());
        assert_eq!(
            serde_json::from_value::<Settings>(json!({
                "business_name": "Shop", "currency": "USD", "vat_rate": "7.5", "user_role": "admin"
            }))
            .unwrap()
            .tax_rate()
            .bps(),
            750
        );
    }

    #[test]
    fn test_expense_defaults_category() {
        let expense: Expense =
            serde_json::from_value(json!({"id": "e1", "title": "Power", "amount": "45.10"})).unwrap();
        assert_eq!(expense.category, DEFAULT_EXPENSE_CATEGORY);
        assert_eq!(expense.amount.cents(), 4510);
    }

    #[test]
    fn test_settings_default_and_formatting() {
        let settings = Settings::default();
        assert_eq!(settings.business_name, "My Business");
        assert_eq!(settings.format_money(Money::from_cents(150000)), "$1,500.00");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("CASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("cheque".parse::<PaymentMethod>().is_err());
        let unknown: PaymentMethod = serde_json::from_value(json!("voucher")).unwrap();
        assert_eq!(unknown, PaymentMethod::Other);
    }

    #[test]
    fn test_receipt_number_is_id_prefix() {
        let sale: Sale = serde_json::from_value(json!({
            "id": "3f2b9c1e-1111-2222-3333-444455556666",
            "total": 10
        }))
        .unwrap();
        assert_eq!(sale.receipt_number(), "3f2b9c1e");
    }

    #[test]
    fn test_timestamp_parse_variants() {
        assert!(timestamp::parse("2024-05-01T13:45:10").is_some());
        assert!(timestamp::parse("2024-05-01T13:45:10.5+01:00").is_some());
        assert!(timestamp::parse("yesterday").is_none());
    }
}
