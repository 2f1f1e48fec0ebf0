//! # Register Views
//!
//! The product grid used to pick items and the cart panel beside it.

use comfy_table::{Cell, CellAlignment};

use super::new_table;
use crate::state::App;
use poslite_core::{format_count, CartLine, Product};

/// Products offered on the register: in stock and matching the filter.
pub fn grid_products(app: &App) -> Vec<&Product> {
    let needle = app.grid_filter.trim();
    app.products
        .records()
        .iter()
        .filter(|p| p.in_stock())
        .filter(|p| needle.is_empty() || p.matches(needle))
        .collect()
}

pub fn product_grid(app: &App) -> String {
    let products = grid_products(app);
    if products.is_empty() {
        return "No products available.".to_string();
    }

    let mut table = new_table(app.theme, &["Product", "Category", "Price", "Stock"]);
    for product in products {
        table.add_row(vec![
            Cell::new(&product.name),
            Cell::new(&product.category),
            Cell::new(app.money(product.sale_price)).set_alignment(CellAlignment::Right),
            Cell::new(format_count(product.quantity)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

/// Cart lines and totals. Totals are recomputed on every call.
pub fn cart_panel(app: &App) -> String {
    if app.cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut table = new_table(app.theme, &["Item", "Price", "Qty", "Total"]);
    for line in app.cart.lines() {
        table.add_row(vec![
            Cell::new(&line.name),
            Cell::new(app.money(line.price)).set_alignment(CellAlignment::Right),
            Cell::new(line.quantity).set_alignment(CellAlignment::Right),
            Cell::new(line_total(app, line)).set_alignment(CellAlignment::Right),
        ]);
    }

    let totals = match app.cart.totals(app.settings.tax_rate()) {
        Ok(totals) => totals,
        Err(err) => return format!("{table}\n{err}"),
    };
    format!(
        "{table}\nSubtotal: {}\nVAT ({}%): {}\nTotal: {}",
        app.money(totals.subtotal),
        app.settings.vat_rate,
        app.money(totals.vat),
        app.money(totals.total),
    )
}

fn line_total(app: &App, line: &CartLine) -> String {
    match line.line_total() {
        Ok(total) => app.money(total),
        Err(_) => "overflow".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::state::testing;
    use poslite_core::Money;

    fn product(id: &str, name: &str, category: &str, quantity: i64) -> Product {
        Product {
            id: Some(id.to_string()),
            name: name.to_string(),
            category: category.to_string(),
            barcode: None,
            cost_price: Money::zero(),
            sale_price: Money::from_cents(1000),
            quantity,
            created_at: None,
        }
    }

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let mut app = testing::app("http://127.0.0.1:9", dir.path());
        app.products.replace(vec![
            product("p1", "Wireless Mouse", "Electronics", 5),
            product("p2", "Notebook", "Stationery", 0),
            product("p3", "USB Cable", "Electronics", 2),
        ]);
        (dir, app)
    }

    #[test]
    fn test_grid_hides_out_of_stock_and_filters() {
        let (_dir, mut app) = app();
        let names: Vec<_> = grid_products(&app).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Wireless Mouse", "USB Cable"]);

        app.grid_filter = "ELECTRO".to_string();
        assert_eq!(grid_products(&app).len(), 2);

        app.grid_filter = "cable".to_string();
        assert!(product_grid(&app).contains("USB Cable"));
        assert!(!product_grid(&app).contains("Wireless Mouse"));

        app.grid_filter = "note".to_string();
        assert_eq!(product_grid(&app), "No products available.");
    }

    #[test]
    fn test_cart_panel_totals() {
        let (_dir, mut app) = app();
        assert_eq!(cart_panel(&app), "Cart is empty");

        app.settings.vat_rate = 10.0;
        add_to_cart(&mut app, "p1").unwrap();
        add_to_cart(&mut app, "p1").unwrap();

        let text = cart_panel(&app);
        assert!(text.contains("Wireless Mouse"));
        assert!(text.contains("Subtotal: $20.00"));
        assert!(text.contains("VAT (10%): $2.00"));
        assert!(text.contains("Total: $22.00"));
    }

    #[test]
    fn test_cart_panel_reports_oversized_totals() {
        let (_dir, mut app) = app();
        let mut huge = product("p9", "Yacht", "Marine", 3);
        huge.sale_price = Money::from_cents(i64::MAX - 100);
        app.products.replace(vec![huge]);
        add_to_cart(&mut app, "p9").unwrap();
        app.settings.vat_rate = 10.0;

        let text = cart_panel(&app);
        assert!(text.contains("Yacht"));
        assert!(text.contains("Amount too large for this sale"));
        assert!(!text.contains("Subtotal:"));
    }
}
