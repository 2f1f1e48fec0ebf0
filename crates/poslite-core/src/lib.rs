//! # poslite-core: Pure Business Logic for POS Lite
//!
//! Everything the register needs to decide, computed without I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        POS Lite Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal app (apps/terminal)                    │   │
//! │  │    Register ──► Cart ──► Receipt      Admin tables ──► Reports  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ poslite-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ PieChart  │  │   │
//! │  │   │ Settings  │  │ Currency  │  │ CartLine  │  │LineSeries │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 poslite-client (REST backend)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Backend records (Product, Customer, Expense, Settings, Sale)
//! - [`money`] - Integer money and currency formatting
//! - [`cart`] - Stock-bounded cart transitions and totals
//! - [`report`] - Report aggregate and chart datasets
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use poslite_core::{Cart, Money, Product, TaxRate};
//!
//! let catalog = vec![Product {
//!     id: Some("p1".into()),
//!     name: "Mouse".into(),
//!     category: "Electronics".into(),
//!     barcode: None,
//!     cost_price: Money::from_cents(1000),
//!     sale_price: Money::from_cents(2500),
//!     quantity: 5,
//!     created_at: None,
//! }];
//!
//! let cart = Cart::new().add(&catalog, "p1").unwrap();
//! let totals = cart.totals(TaxRate::from_percentage(10.0)).unwrap();
//! assert_eq!(totals.total.cents(), 2750);
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_count, Currency, Money};
pub use report::{LineSeries, PieChart, PieSlice, Report, ReportWindow, SeriesPoint};
pub use types::*;
