//! # Configuration
//!
//! Resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--base-url`, `--data-dir`)
//! 2. Environment variables (`POSLITE_*`)
//! 3. `.env` in the working directory (same keys, never overrides 2)
//! 4. Config file (`<config dir>/config.toml`)
//! 5. Defaults (this file)
//!
//! ```toml
//! # ~/.config/pos-lite/config.toml
//! base_url = "http://pos.local:5000"
//! timeout_secs = 20
//! data_dir = "/var/lib/pos-lite"
//! ```

use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use poslite_client::{ClientConfig, DEFAULT_BASE_URL};

pub const CONFIG_FILE: &str = "config.toml";
pub const DOTENV_FILE: &str = ".env";

pub const ENV_BASE_URL: &str = "POSLITE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "POSLITE_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "POSLITE_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend address; `/api/...` is appended.
    pub base_url: String,

    /// Whole-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,

    /// Where local preferences (the theme) are stored.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Loads configuration from the platform config dir, the process
    /// environment and the given flags.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let dirs = project_dirs();

        let file = match dirs.as_ref().map(|d| d.config_dir().join(CONFIG_FILE)) {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "Reading config file");
                Some(FileConfig::read(&path)?)
            }
            _ => None,
        };

        let dotenv = read_dotenv(Path::new(DOTENV_FILE));

        let default_data_dir = dirs
            .as_ref()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".pos-lite"));

        AppConfig::resolve(
            default_data_dir,
            file,
            |key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()),
            overrides,
        )
    }

    /// Layers the sources in priority order.
    pub fn resolve(
        default_data_dir: PathBuf,
        file: Option<FileConfig>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut config = AppConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            data_dir: default_data_dir,
        };

        if let Some(file) = file {
            if let Some(url) = file.base_url {
                config.base_url = url;
            }
            if let Some(secs) = file.timeout_secs {
                config.timeout = timeout_from_secs(secs);
            }
            if let Some(dir) = file.data_dir {
                config.data_dir = dir;
            }
        }

        if let Some(url) = env(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.timeout = timeout_from_secs(secs);
        }
        if let Some(dir) = env(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(url) = &overrides.base_url {
            config.base_url = url.clone();
        }
        if let Some(dir) = &overrides.data_dir {
            config.data_dir = dir.clone();
        }

        Ok(config)
    }

    /// Backend client configuration derived from this config.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.base_url.clone());
        match self.timeout {
            Some(timeout) => config.timeout(timeout),
            None => config,
        }
    }
}

/// `KEY=value` pairs from a dotenv file. A missing file yields no pairs;
/// malformed lines are skipped.
pub fn read_dotenv(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => {
            let vars: HashMap<String, String> = iter.filter_map(Result::ok).collect();
            debug!(path = %path.display(), count = vars.len(), "Loaded .env");
            vars
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "No .env loaded");
            HashMap::new()
        }
    }
}

/// `0` means "no timeout".
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "poslite", "pos-lite")
}
