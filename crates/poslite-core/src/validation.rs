//! # Validation Module
//!
//! Form validation run before any write reaches the backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal prompts                                             │
//! │  └── Type parsing (numbers, decimals)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Required fields, ranges, identifier shape                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Whatever it enforces; `success: false` surfaces as an error       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use poslite_core::validation::{validate_name, validate_record_id};
//!
//! assert!(validate_name("name", "Coffee Mug").is_ok());
//! assert!(validate_record_id("a/b").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Customer, Expense, Product, Settings};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required display string (name, title, business name).
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an identifier that will be interpolated into a URL path.
pub fn validate_record_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain path separators or whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a VAT percentage (0 to 100 inclusive).
pub fn validate_vat_rate(rate: f64) -> ValidationResult<()> {
    if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
        return Err(ValidationError::OutOfRange {
            field: "vat_rate".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_name("name", &product.name)?;

    if product.cost_price.is_negative() {
        return Err(ValidationError::Negative {
            field: "cost_price".to_string(),
        });
    }
    if product.sale_price.is_negative() {
        return Err(ValidationError::Negative {
            field: "sale_price".to_string(),
        });
    }
    if product.quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    validate_name("name", &customer.name)
}

pub fn validate_expense(expense: &Expense) -> ValidationResult<()> {
    validate_name("title", &expense.title)?;

    if !expense.amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    validate_name("business_name", &settings.business_name)?;
    validate_vat_rate(settings.vat_rate)?;

    if settings.currency.code().trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product() -> Product {
        Product {
            id: None,
            name: "Keyboard".to_string(),
            category: "Electronics".to_string(),
            barcode: None,
            cost_price: Money::from_cents(3000),
            sale_price: Money::from_cents(6000),
            quantity: 30,
            created_at: None,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Mouse").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("../x").is_err());
        assert!(validate_record_id("a b").is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product()).is_ok());

        let mut bad = product();
        bad.quantity = -1;
        assert_eq!(
            validate_product(&bad),
            Err(ValidationError::Negative {
                field: "quantity".to_string()
            })
        );

        let mut bad = product();
        bad.sale_price = Money::from_cents(-1);
        assert!(validate_product(&bad).is_err());
    }

    #[test]
    fn test_validate_expense_amount() {
        let mut expense = Expense {
            id: None,
            title: "Rent".to_string(),
            category: "rent".to_string(),
            amount: Money::from_cents(50000),
            created_at: None,
        };
        assert!(validate_expense(&expense).is_ok());

        expense.amount = Money::zero();
        assert!(validate_expense(&expense).is_err());
    }

    #[test]
    fn test_validate_settings() {
        let mut settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());

        settings.vat_rate = 150.0;
        assert!(validate_settings(&settings).is_err());

        settings.vat_rate = f64::NAN;
        assert!(validate_vat_rate(settings.vat_rate).is_err());
        assert!(validate_vat_rate(f64::INFINITY).is_err());
        assert_eq!(
            validate_vat_rate(-0.5).unwrap_err().to_string(),
            "vat_rate must be between 0 and 100"
        );
    }
}
