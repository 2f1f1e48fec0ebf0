//! # Command Line
//!
//! `pos-lite` with no subcommand opens the register. Every other screen can
//! be opened directly, which is handy for back-office terminals that never
//! ring up sales.
//!
//! ```text
//! pos-lite [--base-url URL] [--data-dir DIR] [COMMAND]
//!
//!   register            Sell products (default)
//!   products            Manage the catalog
//!   customers           Manage customers
//!   expenses            Record expenses
//!   report [WINDOW]     daily | weekly | monthly
//!   settings            Business name, currency, VAT
//!   theme [toggle]      Show or flip light/dark
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Debug, Parser)]
#[command(name = "pos-lite", version, about = "Point-of-sale terminal for small shops")]
pub struct Cli {
    /// Backend address, e.g. http://127.0.0.1:5000
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory for local preferences
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Subcommand)]
pub enum Command {
    /// Sell products
    #[default]
    Register,

    /// Manage the catalog
    Products,

    /// Manage customers
    Customers,

    /// Record expenses
    Expenses,

    /// Show a sales report
    Report {
        /// Report window: daily, weekly or monthly
        #[arg(default_value = "daily")]
        window: String,
    },

    /// Edit business settings
    Settings,

    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

impl Cli {
    /// Flags that take priority over the environment and config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            data_dir: self.data_dir.clone(),
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}
