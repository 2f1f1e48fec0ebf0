//! # Repository Module
//!
//! One repository per backend resource, all reached through [`Backend`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  backend.products().list()                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ResourceRepository<Product>                                           │
//! │  ├── list(&self)                 GET    /api/products                  │
//! │  ├── create(&self, &product)     POST   /api/products                  │
//! │  ├── update(&self, &product)     PUT    /api/products/:id              │
//! │  ├── save(&self, &product)       create or update, by id presence      │
//! │  └── delete(&self, id)           DELETE /api/products/:id              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { "success": true, "products": [...] }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ResourceRepository`] - Products, customers and expenses
//! - [`SettingsRepository`] - Business settings
//! - [`SaleRepository`] - Sale submission
//! - [`ReportRepository`] - Report windows
//!
//! [`Backend`]: crate::Backend
//! [`ResourceRepository`]: resource::ResourceRepository
//! [`SettingsRepository`]: settings::SettingsRepository
//! [`SaleRepository`]: sale::SaleRepository
//! [`ReportRepository`]: report::ReportRepository

pub mod report;
pub mod resource;
pub mod sale;
pub mod settings;
