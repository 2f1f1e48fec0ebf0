//! # Theme Commands

use tracing::{debug, info};

use crate::error::AppResult;
use crate::state::{App, Theme};

/// Flips light/dark and persists the choice.
pub fn toggle_theme(app: &mut App) -> AppResult<Theme> {
    debug!(current = %app.theme, "toggle_theme command");

    let next = app.theme.toggled();
    app.theme_store().save(next)?;
    app.theme = next;

    info!(theme = %next, "Theme changed");
    Ok(next)
}
