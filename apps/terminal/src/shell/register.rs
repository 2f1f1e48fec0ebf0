//! Register screen: pick products, adjust the cart, take payment.

use inquire::{Select, Text};
use std::fmt;

use super::{ask, navigate, render, settle, Flow, Nav, Screen};
use crate::commands::cart::{add_to_cart, adjust_cart, clear_cart, complete_sale};
use crate::commands::records::load_records;
use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::state::App;
use crate::view;
use poslite_core::{PaymentMethod, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    AddItem,
    AdjustQuantity,
    Search,
    ChoosePayment,
    CompleteSale,
    ShowReceipt,
    ClearCart,
    Refresh,
    Nav(Nav),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddItem => f.write_str("Add item"),
            Action::AdjustQuantity => f.write_str("Adjust quantity"),
            Action::Search => f.write_str("Search products"),
            Action::ChoosePayment => f.write_str("Payment method"),
            Action::CompleteSale => f.write_str("Complete sale"),
            Action::ShowReceipt => f.write_str("Show last receipt"),
            Action::ClearCart => f.write_str("Clear cart"),
            Action::Refresh => f.write_str("Refresh"),
            Action::Nav(nav) => write!(f, "{nav}"),
        }
    }
}

/// Menu entries for the current state. Cart-only actions are hidden while
/// the cart is empty; completing a sale stays visible so an empty cart
/// still gets its warning.
fn actions(app: &App) -> Vec<Action> {
    let mut actions = vec![Action::AddItem];
    if !app.cart.is_empty() {
        actions.push(Action::AdjustQuantity);
    }
    actions.push(Action::Search);
    actions.push(Action::ChoosePayment);
    actions.push(Action::CompleteSale);
    if app.receipt.is_some() {
        actions.push(Action::ShowReceipt);
    }
    if !app.cart.is_empty() {
        actions.push(Action::ClearCart);
    }
    actions.push(Action::Refresh);
    actions.extend(Nav::menu(Screen::Register).into_iter().map(Action::Nav));
    actions
}

pub(super) async fn run(app: &mut App, prompter: &mut dyn Prompter) -> AppResult<Option<Screen>> {
    loop {
        let mut header = format!("{} | Payment: {}", app.settings.business_name, app.payment_method);
        if !app.grid_filter.trim().is_empty() {
            header.push_str(&format!(" | Filter: \"{}\"", app.grid_filter.trim()));
        }
        let grid = view::register::product_grid(app);
        let cart = view::register::cart_panel(app);
        render(app, &[header, grid, cart]);

        let Some(action) = ask(Select::new("Register:", actions(app)).prompt())? else {
            return Ok(None);
        };

        match action {
            Action::AddItem => {
                if let Some(id) = pick_product(app)? {
                    settle(add_to_cart(app, &id));
                }
            }
            Action::AdjustQuantity => adjust(app)?,
            Action::Search => {
                if let Some(filter) =
                    ask(Text::new("Search:").with_default(&app.grid_filter).prompt())?
                {
                    app.grid_filter = filter;
                }
            }
            Action::ChoosePayment => {
                let cursor = PaymentMethod::ALL
                    .iter()
                    .position(|m| *m == app.payment_method)
                    .unwrap_or(0);
                let prompt = Select::new("Payment method:", PaymentMethod::ALL.to_vec())
                    .with_starting_cursor(cursor)
                    .prompt();
                if let Some(method) = ask(prompt)? {
                    app.payment_method = method;
                }
            }
            Action::CompleteSale => {
                let method = app.payment_method;
                if let Ok(sale) = complete_sale(app, method).await {
                    println!("\n{}", view::receipt::receipt(&sale, &app.settings));
                }
            }
            Action::ShowReceipt => {
                if let Some(sale) = &app.receipt {
                    println!("\n{}", view::receipt::receipt(sale, &app.settings));
                }
            }
            Action::ClearCart => settle(clear_cart(app, prompter)),
            Action::Refresh => load_records::<Product>(app).await,
            Action::Nav(nav) => {
                if let Flow::Leave(next) = navigate(app, nav) {
                    return Ok(next);
                }
            }
        }
    }
}

/// Select from the grid. Returns the product id.
fn pick_product(app: &App) -> AppResult<Option<String>> {
    let products = view::register::grid_products(app);
    if products.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = products
        .iter()
        .map(|p| format!("{} ({}, {} left)", p.name, app.money(p.sale_price), p.quantity))
        .collect();

    let choice = ask(Select::new("Add:", labels).raw_prompt())?;
    Ok(choice
        .map(|option| products[option.index].id().to_string())
        .filter(|id| !id.is_empty()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Increase,
    Decrease,
    Remove,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Increase => "+1",
            Step::Decrease => "-1",
            Step::Remove => "Remove",
        })
    }
}

fn adjust(app: &mut App) -> AppResult<()> {
    let lines: Vec<(String, String)> = app
        .cart
        .lines()
        .iter()
        .map(|l| (l.product_id.clone(), format!("{} x{}", l.name, l.quantity)))
        .collect();
    if lines.is_empty() {
        return Ok(());
    }

    let labels: Vec<String> = lines.iter().map(|(_, label)| label.clone()).collect();
    let Some(choice) = ask(Select::new("Line:", labels).raw_prompt())? else {
        return Ok(());
    };
    let (product_id, _) = &lines[choice.index];

    let steps = vec![Step::Increase, Step::Decrease, Step::Remove];
    let Some(step) = ask(Select::new("Change:", steps).prompt())? else {
        return Ok(());
    };

    let delta = match step {
        Step::Increase => 1,
        Step::Decrease => -1,
        Step::Remove => -app.cart.line(product_id).map(|l| l.quantity).unwrap_or(0),
    };
    settle(adjust_cart(app, product_id, delta));
    Ok(())
}
