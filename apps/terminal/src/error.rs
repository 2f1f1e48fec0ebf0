//! # Application Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in POS Lite                               │
//! │                                                                         │
//! │  Command handler ── Result<T, AppError>                                │
//! │       │                                                                 │
//! │       ├── CoreError    (out of stock, empty cart, validation)          │
//! │       ├── ClientError  (transport, status, decode, success: false)     │
//! │       ├── ConfigError  (config file, env overrides)                    │
//! │       └── prompt / theme file failures                                 │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │       AppError { code, message }                                       │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │       banner text (message) + log line (code)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never produce an `AppError`: they are logged and swallowed where
//! they happen, leaving the cache as it was.

use serde::Serialize;

use crate::config::ConfigError;
use poslite_client::ClientError;
use poslite_core::{CoreError, ValidationError};

/// Error shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable category, used in logs
    pub code: ErrorCode,

    /// Human-readable message, used in banners
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input failed local validation
    ValidationError,

    /// Product missing or stock exhausted
    InsufficientStock,

    /// Sale attempted on an empty cart
    EmptyCart,

    /// Backend answered `success: false`
    Rejected,

    /// Backend unreachable or returned something unreadable
    BackendError,

    /// Operation the backend does not offer
    Unsupported,

    /// Configuration could not be loaded
    ConfigError,

    /// Local preference file could not be read or written
    StorageError,

    /// Interactive prompt failed
    PromptError,

    /// Startup failure outside the categories above
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::StorageError, message)
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::PromptError, message)
    }
}

/// Converts cart and validation errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::OutOfStock { .. } | CoreError::NotEnoughStock { .. } => {
                ErrorCode::InsufficientStock
            }
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::AmountTooLarge | CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

/// Converts backend errors.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { message } => AppError::new(ErrorCode::Rejected, message),
            ClientError::Validation(e) => AppError::validation(e.to_string()),
            ClientError::Unsupported { .. } => AppError::new(ErrorCode::Unsupported, err.to_string()),
            ClientError::Config(_) => AppError::new(ErrorCode::ConfigError, err.to_string()),
            ClientError::Transport(_)
            | ClientError::Status { .. }
            | ClientError::Decode(_)
            | ClientError::MissingPayload { .. } => {
                tracing::error!(error = %err, "Backend call failed");
                AppError::new(ErrorCode::BackendError, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<inquire::InquireError> for AppError {
    fn from(err: inquire::InquireError) -> Self {
        AppError::prompt(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for command handlers.
pub type AppResult<T> = Result<T, AppError>;
