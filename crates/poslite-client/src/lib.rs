//! # poslite-client: Backend Client for POS Lite
//!
//! Typed access to the POS Lite REST backend. The backend owns every record
//! and every business rule that touches stored data; this crate only moves
//! JSON in and out and turns the `{success, ...}` envelope into `Result`s.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        POS Lite Data Flow                               │
//! │                                                                         │
//! │  Command handler (apps/terminal)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 poslite-client (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Backend     │    │  Repositories │    │   Envelope   │  │   │
//! │  │   │ (backend.rs)  │    │               │    │              │  │   │
//! │  │   │               │    │ Resource<T>   │    │ success flag │  │   │
//! │  │   │ reqwest +     │◄───│ Settings      │    │ payload key  │  │   │
//! │  │   │ cookie jar    │    │ Sale, Report  │    │ message      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 REST backend  (/api/...)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - Client configuration and the [`Backend`] handle
//! - [`envelope`] - `{success, ...}` response decoding
//! - [`error`] - Client error types
//! - [`repository`] - One repository per resource
//!
//! ## Usage
//!
//! ```rust,ignore
//! use poslite_client::{Backend, ClientConfig};
//!
//! let backend = Backend::new(ClientConfig::new("http://127.0.0.1:5000"))?;
//! let settings = backend.settings().get().await?;
//! let products = backend.products().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod envelope;
pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{Backend, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};

pub use repository::report::ReportRepository;
pub use repository::resource::{Resource, ResourceRepository};
pub use repository::sale::SaleRepository;
pub use repository::settings::SettingsRepository;
