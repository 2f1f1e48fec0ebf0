//! # Client Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / bad JSON / success: false                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (terminal app) ← Banner or alert text                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `success` flag is the only success signal the backend gives, so the
//! categories here exist for logging; the UI treats them all as "the call
//! failed".

use poslite_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx status without a readable envelope.
    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The envelope said `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// `success: true` but the expected payload key was absent.
    #[error("Response is missing '{key}'")]
    MissingPayload { key: String },

    /// The backend has no endpoint for this operation.
    #[error("{resource} records cannot be {operation}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    /// The client is misconfigured (bad base URL).
    #[error("Client configuration error: {0}")]
    Config(String),

    /// Input rejected before any request was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ClientError::Rejected {
            message: message.into(),
        }
    }

    pub fn missing(key: impl Into<String>) -> Self {
        ClientError::MissingPayload { key: key.into() }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for backend operations.
pub type ClientResult<T> = Result<T, ClientError>;
