//! # Theme Preference
//!
//! The only state kept on this machine. Stored as a small JSON object in the
//! data directory so other preferences can share the file:
//!
//! ```json
//! { "theme": "dark" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

pub const PREFERENCES_FILE: &str = "preferences.json";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the preferences file.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(data_dir: &Path) -> Self {
        ThemeStore {
            path: data_dir.join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restores the saved theme. A missing or unreadable file means the default.
    pub fn load(&self) -> Theme {
        let prefs = match self.read_preferences() {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err.message, "Ignoring preferences file");
                return Theme::default();
            }
        };

        prefs
            .get(THEME_KEY)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Persists the theme, keeping any other keys in the file.
    pub fn save(&self, theme: Theme) -> AppResult<()> {
        let mut prefs = self.read_preferences().unwrap_or_default();
        prefs.insert(THEME_KEY.to_string(), Value::String(theme.as_str().to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::storage(format!("{}: {e}", parent.display())))?;
        }
        let body = serde_json::to_string_pretty(&Value::Object(prefs))
            .map_err(|e| AppError::storage(e.to_string()))?;
        std::fs::write(&self.path, body)
            .map_err(|e| AppError::storage(format!("{}: {e}", self.path.display())))?;

        debug!(theme = %theme, path = %self.path.display(), "Theme saved");
        Ok(())
    }

    fn read_preferences(&self) -> AppResult<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(AppError::storage(e.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(AppError::storage("preferences file is not a JSON object")),
            Err(e) => Err(AppError::storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_light() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ThemeStore::new(dir.path()).load(), Theme::Light);
    }

    #[test]
    fn test_save_then_restore() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(&dir.path().join("nested"));

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Theme::Dark);
        assert_eq!(ThemeStore::new(&dir.path().join("nested")).load(), Theme::Dark);
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());
        std::fs::write(store.path(), r#"{"sidebar":"collapsed","theme":"light"}"#).unwrap();

        store.save(Theme::Dark).unwrap();
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["sidebar"], "collapsed");
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), Theme::Light);

        std::fs::write(store.path(), r#"{"theme":"neon"}"#).unwrap();
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
