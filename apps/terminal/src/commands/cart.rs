//! # Cart Commands
//!
//! Handlers for cart manipulation and sale completion.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│ Receipt  │       │
//! │  │  Cart    │     │          │     │  method  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       complete_sale                      │
//! │                   adjust_cart       (POST /api/sales,                  │
//! │                        │             reload catalog)                   │
//! │                        ▼                                                │
//! │                   clear_cart (confirm) ─────────────►                  │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock checks use the last catalog snapshot in [`App::products`]; the
//! backend does not re-check when the sale is posted.

use tracing::{debug, info};

use crate::commands::records::load_records;
use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;
use crate::state::App;
use poslite_core::{CoreError, PaymentMethod, Product, Sale};

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Product unknown or out of stock: warning banner, cart unchanged
/// - Already at stock limit: warning banner, cart unchanged
/// - Otherwise: quantity + 1, or a new line at the current sale price
pub fn add_to_cart(app: &mut App, product_id: &str) -> AppResult<()> {
    debug!(product_id = %product_id, "add_to_cart command");

    match app.cart.add(app.products.records(), product_id) {
        Ok(cart) => {
            app.cart = cart;
            Ok(())
        }
        Err(err) => Err(warn_operator(app, err)),
    }
}

/// Changes a line's quantity by `delta`; a line that reaches zero is removed.
pub fn adjust_cart(app: &mut App, product_id: &str, delta: i64) -> AppResult<()> {
    debug!(product_id = %product_id, delta = delta, "adjust_cart command");

    match app.cart.adjust(app.products.records(), product_id, delta) {
        Ok(cart) => {
            app.cart = cart;
            Ok(())
        }
        Err(err) => Err(warn_operator(app, err)),
    }
}

/// Empties the cart after confirmation.
///
/// Returns `false` without asking when the cart is already empty.
pub fn clear_cart(app: &mut App, prompter: &mut dyn Prompter) -> AppResult<bool> {
    debug!(lines = app.cart.len(), "clear_cart command");

    if app.cart.is_empty() {
        return Ok(false);
    }
    if !prompter.confirm("Clear the cart?")? {
        return Ok(false);
    }

    app.cart = app.cart.cleared();
    Ok(true)
}

/// Submits the cart as a sale.
///
/// ## Flow
/// 1. Empty cart: warning, no request
/// 2. `POST /api/sales` with lines, subtotal, VAT, total and payment method
/// 3. On success: keep the receipt, empty the cart, reload the catalog
/// 4. On failure: error banner, cart untouched
pub async fn complete_sale(app: &mut App, method: PaymentMethod) -> AppResult<Sale> {
    debug!(lines = app.cart.len(), payment = %method, "complete_sale command");

    let request = match app.cart.sale_request(app.settings.tax_rate(), method) {
        Ok(request) => request,
        Err(err) => return Err(warn_operator(app, err)),
    };

    let sale = match app.backend.sales().create(&request).await {
        Ok(sale) => sale,
        Err(err) => {
            let err = AppError::from(err);
            app.notices
                .error(format!("Failed to complete sale: {}", err.message));
            return Err(err);
        }
    };

    info!(
        sale_id = %sale.id,
        total = %app.money(sale.total),
        "Sale completed"
    );

    app.payment_method = method;
    app.cart = app.cart.cleared();
    app.receipt = Some(sale.clone());
    app.notices.success("Sale completed successfully!");

    load_records::<Product>(app).await;

    Ok(sale)
}

fn warn_operator(app: &mut App, err: CoreError) -> AppError {
    let err = AppError::from(err);
    app.notices.warning(err.message.clone());
    err
}

// =============================================================================
// Unit Tests
// =============================================================================
