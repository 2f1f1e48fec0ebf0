//! # Error Types
//!
//! Domain-specific error types for poslite-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  poslite-core errors (this file)                                       │
//! │  ├── CoreError        - Cart warnings and domain failures              │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  poslite-client errors (separate crate)                                │
//! │  └── ClientError      - HTTP / envelope failures                       │
//! │                                                                         │
//! │  Terminal app errors                                                   │
//! │  └── AppError         - What banners and alerts display                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart errors are user-facing warnings: the cart is left untouched and the
//! message is shown to the cashier.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product is missing from the catalog snapshot or has no stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap product card (stock: 0)
    ///      │
    ///      ▼
    /// OutOfStock { product_id: "p1" }
    ///      │
    ///      ▼
    /// UI shows: "Product out of stock!"
    /// ```
    #[error("Product out of stock!")]
    OutOfStock { product_id: String },

    /// Adding or increasing a line would exceed the known stock.
    #[error("Not enough stock for {name}: available {available}, requested {requested}")]
    NotEnoughStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Sale completion requested with no lines.
    #[error("Cart is empty!")]
    EmptyCart,

    /// A line total, subtotal or VAT does not fit in an `i64` of cents.
    #[error("Amount too large for this sale")]
    AmountTooLarge,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised before any backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g. an identifier that cannot go in a URL path).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NotEnoughStock {
            name: "Mouse".to_string(),
            available: 3,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for Mouse: available 3, requested 4"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty!");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
