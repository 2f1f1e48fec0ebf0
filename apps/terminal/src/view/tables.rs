//! # Admin Tables
//!
//! Products, customers and expenses as tables, plus the settings panel.

use comfy_table::{Cell, CellAlignment};

use super::new_table;
use crate::state::App;
use poslite_core::format_count;

fn right(text: impl Into<String>) -> Cell {
    Cell::new(text.into()).set_alignment(CellAlignment::Right)
}

pub fn products_table(app: &App) -> String {
    if app.products.is_empty() {
        return "No products yet.".to_string();
    }

    let mut table = new_table(
        app.theme,
        &["Name", "Category", "Barcode", "Cost", "Price", "Stock"],
    );
    for product in app.products.records() {
        table.add_row(vec![
            Cell::new(&product.name),
            Cell::new(&product.category),
            Cell::new(product.barcode.as_deref().unwrap_or("-")),
            right(app.money(product.cost_price)),
            right(app.money(product.sale_price)),
            right(format_count(product.quantity)),
        ]);
    }
    table.to_string()
}

pub fn customers_table(app: &App) -> String {
    if app.customers.is_empty() {
        return "No customers yet.".to_string();
    }

    let mut table = new_table(app.theme, &["Name", "Phone", "Balance"]);
    for customer in app.customers.records() {
        table.add_row(vec![
            Cell::new(&customer.name),
            Cell::new(&customer.phone),
            right(app.money(customer.balance)),
        ]);
    }
    table.to_string()
}

pub fn expenses_table(app: &App) -> String {
    if app.expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let mut table = new_table(app.theme, &["Date", "Title", "Category", "Amount"]);
    for expense in app.expenses.records() {
        let date = expense
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(date),
            Cell::new(&expense.title),
            Cell::new(&expense.category),
            right(app.money(expense.amount)),
        ]);
    }
    table.to_string()
}

pub fn settings_panel(app: &App) -> String {
    let settings = &app.settings;
    let mut table = new_table(app.theme, &["Setting", "Value"]);
    table.add_row(vec!["Business name".to_string(), settings.business_name.clone()]);
    table.add_row(vec![
        "Currency".to_string(),
        format!("{} ({})", settings.currency.code(), settings.currency.symbol()),
    ]);
    table.add_row(vec!["VAT rate".to_string(), format!("{}%", settings.vat_rate)]);
    table.add_row(vec!["Role".to_string(), settings.user_role.clone()]);
    table.add_row(vec!["Theme".to_string(), app.theme.to_string()]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing;
    use poslite_core::{Currency, Customer, Expense, Money, Product};

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let app = testing::app("http://127.0.0.1:9", dir.path());
        (dir, app)
    }

    #[test]
    fn test_empty_tables() {
        let (_dir, app) = app();
        assert_eq!(products_table(&app), "No products yet.");
        assert_eq!(customers_table(&app), "No customers yet.");
        assert_eq!(expenses_table(&app), "No expenses recorded.");
    }

    #[test]
    fn test_products_table_uses_currency() {
        let (_dir, mut app) = app();
        app.settings.currency = Currency::Ngn;
        app.products.replace(vec![Product {
            id: Some("p1".to_string()),
            name: "Rice 50kg".to_string(),
            category: "Grocery".to_string(),
            barcode: None,
            cost_price: Money::from_cents(4_000_000),
            sale_price: Money::from_cents(4_500_000),
            quantity: 1200,
            created_at: None,
        }]);

        let text = products_table(&app);
        assert!(text.contains("Rice 50kg"));
        assert!(text.contains("₦45,000.00"));
        assert!(text.contains("1,200"));
    }

    #[test]
    fn test_customers_and_expenses() {
        let (_dir, mut app) = app();
        app.customers.replace(vec![Customer {
            id: Some("c1".to_string()),
            name: "Ada".to_string(),
            phone: "555-0100".to_string(),
            balance: Money::from_cents(-500),
            created_at: None,
        }]);
        app.expenses.replace(vec![Expense {
            id: Some("e1".to_string()),
            title: "Electricity".to_string(),
            category: "utilities".to_string(),
            amount: Money::from_cents(12_000),
            created_at: poslite_core::timestamp::parse("2024-05-02T08:00:00"),
        }]);

        assert!(customers_table(&app).contains("$-5.00"));
        let expenses = expenses_table(&app);
        assert!(expenses.contains("2024-05-02"));
        assert!(expenses.contains("$120.00"));
    }

    #[test]
    fn test_settings_panel() {
        let (_dir, app) = app();
        let text = settings_panel(&app);
        assert!(text.contains("My Business"));
        assert!(text.contains("USD ($)"));
        assert!(text.contains("0%"));
    }
}
