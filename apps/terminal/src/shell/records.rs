//! Products, customers and expenses screens.
//!
//! One loop serves all three; [`RecordScreen`] supplies the table and the
//! form fields for each record type.

use inquire::validator::Validation;
use inquire::{CustomType, Select, Text};
use std::fmt;

use super::{ask, navigate, render, settle, Flow, Nav, Screen};
use crate::commands::records::{load_records, remove_record, save_record};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::prompt::Prompter;
use crate::state::{App, Cached, FormMode};
use crate::view::tables;
use poslite_core::{Customer, Expense, Money, Product};

pub(super) trait RecordScreen: Cached {
    const SCREEN: Screen;

    fn table(app: &App) -> String;

    /// Prompts for every field, starting from the draft's values.
    /// Returns `false` if the operator backed out part way.
    fn fill(draft: &mut Self) -> AppResult<bool>;
}

impl RecordScreen for Product {
    const SCREEN: Screen = Screen::Products;

    fn table(app: &App) -> String {
        tables::products_table(app)
    }

    fn fill(draft: &mut Self) -> AppResult<bool> {
        let Some(name) = text("Name:", &draft.name)? else { return Ok(false) };
        draft.name = name;
        let Some(category) = text("Category:", &draft.category)? else { return Ok(false) };
        draft.category = category;
        let Some(barcode) = text("Barcode (optional):", draft.barcode.as_deref().unwrap_or(""))?
        else {
            return Ok(false);
        };
        draft.barcode = Some(barcode.trim().to_string()).filter(|b| !b.is_empty());
        let Some(cost) = amount("Cost price", draft.cost_price)? else { return Ok(false) };
        draft.cost_price = cost;
        let Some(price) = amount("Sale price", draft.sale_price)? else { return Ok(false) };
        draft.sale_price = price;
        let Some(quantity) = count("Quantity", draft.quantity)? else { return Ok(false) };
        draft.quantity = quantity;
        Ok(true)
    }
}

impl RecordScreen for Customer {
    const SCREEN: Screen = Screen::Customers;

    fn table(app: &App) -> String {
        tables::customers_table(app)
    }

    fn fill(draft: &mut Self) -> AppResult<bool> {
        let Some(name) = text("Name:", &draft.name)? else { return Ok(false) };
        draft.name = name;
        let Some(phone) = text("Phone:", &draft.phone)? else { return Ok(false) };
        draft.phone = phone;
        let Some(balance) = amount("Balance", draft.balance)? else { return Ok(false) };
        draft.balance = balance;
        Ok(true)
    }
}

impl RecordScreen for Expense {
    const SCREEN: Screen = Screen::Expenses;

    fn table(app: &App) -> String {
        tables::expenses_table(app)
    }

    fn fill(draft: &mut Self) -> AppResult<bool> {
        let Some(title) = text("Title:", &draft.title)? else { return Ok(false) };
        draft.title = title;
        let Some(category) = text("Category:", &draft.category)? else { return Ok(false) };
        draft.category = category;
        let Some(amount) = amount("Amount", draft.amount)? else { return Ok(false) };
        draft.amount = amount;
        Ok(true)
    }
}

// =============================================================================
// Field Prompts
// =============================================================================

fn text(label: &str, current: &str) -> AppResult<Option<String>> {
    ask(Text::new(label).with_default(current).prompt())
}

/// Largest amount a form accepts, in major units.
const MAX_AMOUNT: f64 = 1e13;

/// Typed amount to cents. `None` for NaN, infinities and values past
/// [`MAX_AMOUNT`].
fn to_money(value: f64) -> Option<Money> {
    if value.abs() >= MAX_AMOUNT {
        return None;
    }
    Money::from_decimal(value)
}

fn amount(label: &str, current: Money) -> AppResult<Option<Money>> {
    let prompt = CustomType::<f64>::new(&format!("{label}:"))
        .with_default(current.as_decimal())
        .with_error_message("Please type a number, e.g. 12.50")
        .with_validator(|value: &f64| {
            Ok(match to_money(*value) {
                Some(_) => Validation::Valid,
                None => Validation::Invalid("Please type a finite amount, e.g. 12.50".into()),
            })
        })
        .prompt();

    match ask(prompt)? {
        None => Ok(None),
        Some(value) => to_money(value)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("{label} is not a valid amount"))),
    }
}

fn count(label: &str, current: i64) -> AppResult<Option<i64>> {
    ask(CustomType::<i64>::new(&format!("{label}:"))
        .with_default(current)
        .with_error_message("Please type a whole number")
        .prompt())
}

// =============================================================================
// Screen Loop
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    New,
    Edit,
    Delete,
    ContinueEditing,
    Refresh,
    Nav(Nav),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::New => f.write_str("New"),
            Action::Edit => f.write_str("Edit"),
            Action::Delete => f.write_str("Delete"),
            Action::ContinueEditing => f.write_str("Continue editing"),
            Action::Refresh => f.write_str("Refresh"),
            Action::Nav(nav) => write!(f, "{nav}"),
        }
    }
}

fn actions<R: RecordScreen>(app: &App) -> Vec<Action> {
    let cache = R::cache(app);
    let mut actions = vec![Action::New];
    if R::UPDATABLE && !cache.is_empty() {
        actions.push(Action::Edit);
    }
    if !cache.is_empty() {
        actions.push(Action::Delete);
    }
    if cache.form().is_some() {
        actions.push(Action::ContinueEditing);
    }
    actions.push(Action::Refresh);
    actions.extend(Nav::menu(R::SCREEN).into_iter().map(Action::Nav));
    actions
}

/// Heading for an open form, e.g. `Editing product "Mouse"`.
fn form_heading<R: RecordScreen>(app: &App) -> Option<String> {
    let form = R::cache(app).form()?;
    Some(match &form.mode {
        FormMode::New => format!("New {} (unsaved)", R::LABEL.to_lowercase()),
        FormMode::Edit { .. } => format!(
            "Editing {} \"{}\"",
            R::LABEL.to_lowercase(),
            form.draft.display_name()
        ),
    })
}

pub(super) async fn run<R: RecordScreen>(
    app: &mut App,
    prompter: &mut dyn Prompter,
) -> AppResult<Option<Screen>> {
    load_records::<R>(app).await;

    loop {
        let mut panels = vec![R::table(app)];
        panels.extend(form_heading::<R>(app));
        render(app, &panels);

        let prompt = Select::new(&format!("{}:", R::SCREEN), actions::<R>(app)).prompt();
        let Some(action) = ask(prompt)? else {
            return Ok(None);
        };

        match action {
            Action::New => {
                R::cache_mut(app).open_new(R::blank());
                edit_form::<R>(app).await?;
            }
            Action::Edit => {
                if let Some(id) = pick::<R>(app, "Edit:")? {
                    if R::cache_mut(app).open_edit(&id) {
                        edit_form::<R>(app).await?;
                    }
                }
            }
            Action::Delete => {
                if let Some(id) = pick::<R>(app, "Delete:")? {
                    settle(remove_record::<R>(app, prompter, &id).await);
                }
            }
            Action::ContinueEditing => edit_form::<R>(app).await?,
            Action::Refresh => load_records::<R>(app).await,
            Action::Nav(nav) => {
                if let Flow::Leave(next) = navigate(app, nav) {
                    return Ok(next);
                }
            }
        }
    }
}

/// Fills the open form and saves it. Backing out keeps what was typed so
/// far; a failed save or a rejected field keeps the form open.
async fn edit_form<R: RecordScreen>(app: &mut App) -> AppResult<()> {
    let Some(mut draft) = R::cache(app).form().map(|f| f.draft.clone()) else {
        return Ok(());
    };

    let complete = field_outcome(app, R::fill(&mut draft))?;
    if let Some(form) = R::cache_mut(app).form_mut() {
        form.draft = draft.clone();
    }

    if complete {
        settle(save_record(app, &draft).await);
    }
    Ok(())
}

/// Only prompt failures end the screen; anything else becomes an error
/// banner and leaves the form incomplete.
fn field_outcome(app: &mut App, filled: AppResult<bool>) -> AppResult<bool> {
    match filled {
        Ok(complete) => Ok(complete),
        Err(err) if err.code == ErrorCode::PromptError => Err(err),
        Err(err) => {
            app.notices.error(err.message);
            Ok(false)
        }
    }
}

/// Select a cached record. Returns its id.
fn pick<R: RecordScreen>(app: &App, message: &str) -> AppResult<Option<String>> {
    let records = R::cache(app).records();
    let labels: Vec<String> = records.iter().map(|r| r.display_name().to_string()).collect();
    if labels.is_empty() {
        return Ok(None);
    }

    let choice = ask(Select::new(message, labels).raw_prompt())?;
    Ok(choice.and_then(|option| records[option.index].record_id().map(str::to_string)))
}
