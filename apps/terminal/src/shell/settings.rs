//! Settings screen.

use inquire::validator::Validation;
use inquire::{CustomType, Select, Text};
use std::fmt;

use super::{ask, navigate, render, settle, Flow, Nav, Screen};
use crate::commands::settings::save_settings;
use crate::error::AppResult;
use crate::state::App;
use crate::view;
use poslite_core::validation::validate_vat_rate;
use poslite_core::{Currency, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Edit,
    Nav(Nav),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Edit => f.write_str("Edit settings"),
            Action::Nav(nav) => write!(f, "{nav}"),
        }
    }
}

pub(super) async fn run(app: &mut App) -> AppResult<Option<Screen>> {
    loop {
        let panel = view::tables::settings_panel(app);
        render(app, &[panel]);

        let mut actions = vec![Action::Edit];
        actions.extend(Nav::menu(Screen::Settings).into_iter().map(Action::Nav));

        let Some(action) = ask(Select::new("Settings:", actions).prompt())? else {
            return Ok(None);
        };

        match action {
            Action::Edit => {
                if let Some(draft) = fill(&app.settings)? {
                    settle(save_settings(app, &draft).await);
                }
            }
            Action::Nav(nav) => {
                if let Flow::Leave(next) = navigate(app, nav) {
                    return Ok(next);
                }
            }
        }
    }
}

/// Prompts for the editable fields. `None` if the operator backed out.
fn fill(current: &Settings) -> AppResult<Option<Settings>> {
    let mut draft = current.clone();

    let Some(name) = ask(
        Text::new("Business name:")
            .with_default(&current.business_name)
            .prompt(),
    )?
    else {
        return Ok(None);
    };
    draft.business_name = name;

    let (codes, cursor) = currency_choices(&current.currency);
    let Some(code) = ask(
        Select::new("Currency:", codes)
            .with_starting_cursor(cursor)
            .prompt(),
    )?
    else {
        return Ok(None);
    };
    draft.currency = Currency::from_code(&code);

    let Some(vat_rate) = ask(
        CustomType::<f64>::new("VAT rate (%):")
            .with_default(current.vat_rate)
            .with_error_message("Please type a percentage, e.g. 7.5")
            .with_validator(|value: &f64| {
                Ok(match validate_vat_rate(*value) {
                    Ok(()) => Validation::Valid,
                    Err(err) => Validation::Invalid(err.to_string().into()),
                })
            })
            .prompt(),
    )?
    else {
        return Ok(None);
    };
    draft.vat_rate = vat_rate;

    Ok(Some(draft))
}

/// Known codes plus the current one if the backend sent something else.
fn currency_choices(current: &Currency) -> (Vec<String>, usize) {
    let mut codes: Vec<String> = Currency::KNOWN_CODES.iter().map(|c| c.to_string()).collect();
    let position = match codes.iter().position(|c| c == current.code()) {
        Some(position) => position,
        None => {
            codes.push(current.code().to_string());
            codes.len() - 1
        }
    };
    (codes, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_choices_start_at_current() {
        let (codes, cursor) = currency_choices(&Currency::Gbp);
        assert_eq!(codes, vec!["USD", "EUR", "GBP", "NGN"]);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_unknown_currency_is_kept_as_choice() {
        let (codes, cursor) = currency_choices(&Currency::from_code("KES"));
        assert_eq!(codes.len(), 5);
        assert_eq!(codes[cursor], "KES");
    }
}
