//! # Views
//!
//! Pure render functions: application state in, text out. Nothing here
//! mutates state or talks to the backend, so the shell can re-render after
//! every command without side effects.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  &App ──► tables::products_table()  ──► String ──► stdout              │
//! │       ──► register::product_grid()                                     │
//! │       ──► register::cart_panel()                                       │
//! │       ──► receipt::receipt()                                           │
//! │       ──► report::report_view()                                        │
//! │       ──► banners()                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod receipt;
pub mod register;
pub mod report;
pub mod tables;

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::time::Instant;

use crate::state::{NoticeKind, Notices, Theme};

/// Width of text bars in charts.
pub const BAR_WIDTH: usize = 30;

/// A table styled for the active theme.
pub fn new_table(theme: Theme, header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    match theme {
        Theme::Light => {
            table.load_preset(presets::UTF8_FULL_CONDENSED);
            table.set_header(header.iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));
        }
        Theme::Dark => {
            table.load_preset(presets::UTF8_FULL);
            table.set_header(
                header
                    .iter()
                    .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan)),
            );
        }
    }
    table
}

/// Banners still visible at `now`, one per line.
pub fn banners(notices: &Notices, now: Instant) -> String {
    notices
        .active(now)
        .map(|n| {
            let tag = match n.kind {
                NoticeKind::Success => "[ok]",
                NoticeKind::Warning => "[!]",
                NoticeKind::Error => "[x]",
            };
            format!("{tag} {}", n.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A bar of `fraction` × [`BAR_WIDTH`] blocks. Negative or NaN draws nothing.
pub fn bar(fraction: f64) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    "█".repeat((fraction * BAR_WIDTH as f64).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(1.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(2.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(-1.0), "");
        assert_eq!(bar(f64::NAN), "");
        assert_eq!(bar(0.5).chars().count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_banners_render_until_expiry() {
        let mut notices = Notices::default();
        notices.warning("Product out of stock!");
        let raised = notices.latest().unwrap().raised_at;

        assert_eq!(banners(&notices, raised), "[!] Product out of stock!");
        assert_eq!(banners(&notices, raised + Duration::from_secs(3)), "");
    }

    #[test]
    fn test_table_has_header() {
        let table = new_table(Theme::Dark, &["Name", "Price"]);
        let text = table.to_string();
        assert!(text.contains("Name"));
        assert!(text.contains("Price"));
    }
}
