//! # Cart
//!
//! The in-memory shopping cart and its stock-bounded transitions.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Action                 Function              Result                    │
//! │  ──────                 ────────              ──────                    │
//! │                                                                         │
//! │  Tap product card ────► add(catalog, id) ───► new Cart | warning        │
//! │                                                                         │
//! │  Press + / - ─────────► adjust(catalog, id, ±1) ► new Cart | warning    │
//! │                                                                         │
//! │  Clear (confirmed) ───► cleared() ──────────► empty Cart                │
//! │                                                                         │
//! │  Render ──────────────► totals(rate) ───────► subtotal / VAT / total    │
//! │                                                                         │
//! │  Complete sale ───────► sale_request(..) ───► SaleRequest | EmptyCart   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`, in insertion order
//! - `0 < quantity <= stock` for every line, against the catalog snapshot
//!   the transition was given
//! - A line whose quantity would reach zero is removed, never zeroed
//!
//! Transitions never mutate `self`; a rejected transition leaves the caller
//! holding the unchanged cart.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Product, SaleRequest, TaxRate};

/// One product's pending quantity in the current transaction.
///
/// Also the wire shape of a sale item (`product_id`, `name`, `price`,
/// `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Sale price at time of adding (frozen, never re-fetched).
    pub price: Money,

    pub quantity: i64,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id().to_string(),
            name: product.name.clone(),
            price: product.sale_price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> CoreResult<Money> {
        self.price
            .checked_mul_quantity(self.quantity)
            .ok_or(CoreError::AmountTooLarge)
    }
}

/// Subtotal, VAT and total for a cart at a given rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub vat: Money,
    pub total: Money,
}

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product missing from `catalog` or stock ≤ 0: `OutOfStock`
    /// - Line exists and one more would exceed stock: `NotEnoughStock`
    /// - Line exists: quantity + 1
    /// - Otherwise: new line, quantity 1, at the current sale price
    /// - Subtotal no longer fits: `AmountTooLarge`
    pub fn add(&self, catalog: &[Product], product_id: &str) -> CoreResult<Cart> {
        let product = find_product(catalog, product_id)
            .filter(|p| p.in_stock())
            .ok_or_else(|| CoreError::OutOfStock {
                product_id: product_id.to_string(),
            })?;

        let mut next = self.clone();
        match next.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                let requested = line.quantity + 1;
                if requested > product.quantity {
                    return Err(CoreError::NotEnoughStock {
                        name: line.name.clone(),
                        available: product.quantity,
                        requested,
                    });
                }
                line.quantity = requested;
            }
            None => next.lines.push(CartLine::from_product(product)),
        }
        next.subtotal()?;
        Ok(next)
    }

    /// Applies `delta` to an existing line.
    ///
    /// ## Behavior
    /// - No line for `product_id`: unchanged cart
    /// - Result ≤ 0: line removed
    /// - Result above stock (or product gone from the catalog): `NotEnoughStock`
    /// - Subtotal no longer fits: `AmountTooLarge`
    pub fn adjust(&self, catalog: &[Product], product_id: &str, delta: i64) -> CoreResult<Cart> {
        let Some(line) = self.line(product_id) else {
            return Ok(self.clone());
        };

        let requested = line.quantity.saturating_add(delta);
        if requested <= 0 {
            let mut next = self.clone();
            next.lines.retain(|l| l.product_id != product_id);
            return Ok(next);
        }

        let available = find_product(catalog, product_id).map_or(0, |p| p.quantity);
        if delta > 0 && requested > available {
            return Err(CoreError::NotEnoughStock {
                name: line.name.clone(),
                available,
                requested,
            });
        }

        let mut next = self.clone();
        if let Some(line) = next.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = requested;
        }
        next.subtotal()?;
        Ok(next)
    }

    /// Returns an empty cart.
    pub fn cleared(&self) -> Cart {
        Cart::new()
    }

    /// Σ price × qty over all lines.
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.lines.iter().try_fold(Money::zero(), |sum, line| {
            sum.checked_add(line.line_total()?)
                .ok_or(CoreError::AmountTooLarge)
        })
    }

    /// Computes totals. Called on every render; nothing is cached.
    ///
    /// subtotal = Σ price × qty, VAT = subtotal × rate, total = subtotal + VAT
    pub fn totals(&self, rate: TaxRate) -> CoreResult<CartTotals> {
        let subtotal = self.subtotal()?;
        let vat = subtotal.calculate_tax(rate).ok_or(CoreError::AmountTooLarge)?;
        let total = subtotal.checked_add(vat).ok_or(CoreError::AmountTooLarge)?;
        Ok(CartTotals { subtotal, vat, total })
    }

    /// Builds the body for `POST /api/sales`.
    pub fn sale_request(&self, rate: TaxRate, method: PaymentMethod) -> CoreResult<SaleRequest> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let totals = self.totals(rate)?;
        Ok(SaleRequest {
            items: self.lines.clone(),
            subtotal: totals.subtotal,
            vat: totals.vat,
            total: totals.total,
            payment_method: method,
        })
    }
}

fn find_product<'a>(catalog: &'a [Product], product_id: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| p.id() == product_id)
}

// =============================================================================
// Unit Tests
// =============================================================================
