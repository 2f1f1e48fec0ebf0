//! # Interactive Shell
//!
//! Turns a [`Command`] into screens. Each screen is a loop: render the
//! state, ask for one action with `inquire`, run the matching handler,
//! repeat.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dispatch(command)                                                     │
//! │     │                                                                   │
//! │     ├── theme ─────────► ThemeStore only, no backend calls             │
//! │     ├── register ──────► bootstrap ► register loop ─┐                  │
//! │     ├── products  ─┐                                │ (menu jumps)     │
//! │     ├── customers ─┼──► settings ► records loop ◄───┤                  │
//! │     ├── expenses  ─┘                                │                  │
//! │     ├── report ────────► settings ► report loop ◄───┤                  │
//! │     └── settings ──────► settings ► settings form ◄─┘                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers already raise banners for the operator, so the loops only log
//! handler errors at debug level and keep going. Esc backs out of a prompt;
//! Ctrl-C leaves the screen.

mod records;
mod register;
mod settings;

use inquire::{InquireError, Select};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use crate::cli::{Command, ThemeAction};
use crate::commands::records::load_records;
use crate::commands::{self, report::load_report, settings::load_settings, theme::toggle_theme};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::prompt::InquirePrompter;
use crate::state::{App, ThemeStore};
use crate::view;
use poslite_client::Backend;
use poslite_core::{Customer, Expense, Product, ReportWindow};

/// Runs one command to completion.
pub async fn dispatch(command: Command, config: &AppConfig) -> AppResult<()> {
    debug!(?command, "dispatch");

    let theme_store = ThemeStore::new(&config.data_dir);

    if let Command::Theme { action } = &command {
        return theme(theme_store, *action);
    }

    let backend = Backend::new(config.client_config())?;
    let mut app = App::new(backend, theme_store);
    let mut prompter = InquirePrompter;

    let mut next = Some(match command {
        Command::Register => {
            commands::bootstrap(&mut app).await;
            Screen::Register
        }
        Command::Products => Screen::Products,
        Command::Customers => Screen::Customers,
        Command::Expenses => Screen::Expenses,
        Command::Report { window } => {
            let window = ReportWindow::parse(&window)?;
            app.report.set_window(window);
            Screen::Report
        }
        Command::Settings => Screen::Settings,
        Command::Theme { .. } => return Ok(()),
    });

    if next != Some(Screen::Register) {
        load_settings(&mut app).await;
    }

    let mut entered = false;
    while let Some(screen) = next {
        info!(screen = %screen, "Opening screen");
        if entered && screen == Screen::Register {
            load_records::<Product>(&mut app).await;
        }
        entered = true;

        next = match screen {
            Screen::Register => register::run(&mut app, &mut prompter).await?,
            Screen::Products => records::run::<Product>(&mut app, &mut prompter).await?,
            Screen::Customers => records::run::<Customer>(&mut app, &mut prompter).await?,
            Screen::Expenses => records::run::<Expense>(&mut app, &mut prompter).await?,
            Screen::Report => report_screen(&mut app).await?,
            Screen::Settings => settings::run(&mut app).await?,
        };
    }

    Ok(())
}

/// `pos-lite theme [toggle]`.
fn theme(store: ThemeStore, action: Option<ThemeAction>) -> AppResult<()> {
    let current = store.load();
    match action {
        None => println!("Theme: {current}"),
        Some(ThemeAction::Toggle) => {
            let next = current.toggled();
            store.save(next)?;
            info!(theme = %next, "Theme changed");
            println!("Theme: {next}");
        }
    }
    Ok(())
}

// =============================================================================
// Screens
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Register,
    Products,
    Customers,
    Expenses,
    Report,
    Settings,
}

impl Screen {
    /// Jump targets offered from every screen's menu.
    pub(crate) const ALL: [Screen; 6] = [
        Screen::Register,
        Screen::Products,
        Screen::Customers,
        Screen::Expenses,
        Screen::Report,
        Screen::Settings,
    ];
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Register => "Register",
            Screen::Products => "Products",
            Screen::Customers => "Customers",
            Screen::Expenses => "Expenses",
            Screen::Report => "Reports",
            Screen::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// Entries shared by the bottom of every screen menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nav {
    Open(Screen),
    ToggleTheme,
    Quit,
}

impl Nav {
    pub(crate) fn menu(current: Screen) -> Vec<Nav> {
        let mut entries: Vec<Nav> = Screen::ALL
            .into_iter()
            .filter(|s| *s != current)
            .map(Nav::Open)
            .collect();
        entries.push(Nav::ToggleTheme);
        entries.push(Nav::Quit);
        entries
    }
}

impl fmt::Display for Nav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nav::Open(screen) => write!(f, "Go to {screen}"),
            Nav::ToggleTheme => f.write_str("Toggle theme"),
            Nav::Quit => f.write_str("Quit"),
        }
    }
}

/// What a screen loop does after a navigation entry.
pub(crate) enum Flow {
    Stay,
    Leave(Option<Screen>),
}

pub(crate) fn navigate(app: &mut App, nav: Nav) -> Flow {
    match nav {
        Nav::Open(screen) => Flow::Leave(Some(screen)),
        Nav::Quit => Flow::Leave(None),
        Nav::ToggleTheme => {
            if let Err(err) = toggle_theme(app) {
                app.notices.error(format!("Failed to save theme: {}", err.message));
            }
            Flow::Stay
        }
    }
}

// =============================================================================
// Report Screen
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReportAction {
    Window(ReportWindow),
    Refresh,
    Nav(Nav),
}

impl fmt::Display for ReportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportAction::Window(window) => write!(f, "Show {window}"),
            ReportAction::Refresh => f.write_str("Refresh"),
            ReportAction::Nav(nav) => write!(f, "{nav}"),
        }
    }
}

async fn report_screen(app: &mut App) -> AppResult<Option<Screen>> {
    let window = app.report.window().clone();
    load_report(app, window).await;

    loop {
        let panel = view::report::report_view(app);
        render(app, &[panel]);

        let mut options: Vec<ReportAction> = [
            ReportWindow::daily(),
            ReportWindow::weekly(),
            ReportWindow::monthly(),
        ]
        .into_iter()
        .filter(|w| w != app.report.window())
        .map(ReportAction::Window)
        .collect();
        options.push(ReportAction::Refresh);
        options.extend(Nav::menu(Screen::Report).into_iter().map(ReportAction::Nav));

        let Some(action) = ask(Select::new("Report:", options).prompt())? else {
            return Ok(None);
        };

        match action {
            ReportAction::Window(window) => load_report(app, window).await,
            ReportAction::Refresh => {
                let window = app.report.window().clone();
                load_report(app, window).await;
            }
            ReportAction::Nav(nav) => {
                if let Flow::Leave(next) = navigate(app, nav) {
                    return Ok(next);
                }
            }
        }
    }
}

// =============================================================================
// Prompt Helpers
// =============================================================================

/// Maps Esc and Ctrl-C to `None`; other prompt failures are errors.
pub(crate) fn ask<T>(result: Result<T, InquireError>) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(AppError::from(err)),
    }
}

/// Logs a handler error the operator has already seen as a banner.
pub(crate) fn settle<T>(result: AppResult<T>) {
    if let Err(err) = result {
        debug!(error = %err, "Handler finished with error");
    }
}

/// Prints active banners followed by the given panels, then drops
/// expired banners.
pub(crate) fn render(app: &mut App, panels: &[String]) {
    let now = Instant::now();
    println!();
    let banners = view::banners(&app.notices, now);
    if !banners.is_empty() {
        println!("{banners}");
    }
    for panel in panels {
        println!("{panel}");
    }
    app.notices.prune(now);
}
