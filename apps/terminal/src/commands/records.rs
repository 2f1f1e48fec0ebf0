//! # Record Commands
//!
//! Load/save/remove for products, customers and expenses. One generic set
//! of handlers; the record type picks the endpoint and the cache.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save_record(draft)                                                    │
//! │     │                                                                   │
//! │     ├── no id ──► POST /api/{collection}                               │
//! │     └── id ─────► PUT  /api/{collection}/:id                           │
//! │     │                                                                   │
//! │     ├── ok ─────► load_records ► close form ► "{Label} saved"          │
//! │     └── err ────► error banner, form stays open                        │
//! │                                                                         │
//! │  remove_record(id)                                                     │
//! │     │                                                                   │
//! │     ├── not cached ─► nothing                                          │
//! │     ├── declined ───► nothing                                          │
//! │     └── confirmed ──► DELETE ► load_records ► success/error banner     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;
use crate::state::{App, Cached};
use poslite_client::ResourceRepository;

/// Replaces the cache for `R` with the backend's listing.
///
/// Failures are logged; the cache keeps its previous contents.
pub async fn load_records<R: Cached>(app: &mut App) {
    debug!(collection = R::COLLECTION, "load_records command");

    match ResourceRepository::<R>::new(app.backend.clone()).list().await {
        Ok(records) => {
            debug!(collection = R::COLLECTION, count = records.len(), "Cache replaced");
            R::cache_mut(app).replace(records);
        }
        Err(err) => {
            warn!(collection = R::COLLECTION, error = %err, "Failed to load records");
        }
    }
}

/// Creates or updates a record, then reloads and closes the form.
pub async fn save_record<R: Cached>(app: &mut App, record: &R) -> AppResult<R> {
    debug!(
        resource = R::LABEL,
        id = record.record_id().unwrap_or_default(),
        "save_record command"
    );

    match ResourceRepository::<R>::new(app.backend.clone()).save(record).await {
        Ok(saved) => {
            load_records::<R>(app).await;
            R::cache_mut(app).close_form();
            app.notices.success(format!("{} saved successfully", R::LABEL));
            Ok(saved)
        }
        Err(err) => {
            let err = AppError::from(err);
            app.notices
                .error(format!("Failed to save {}: {}", R::LABEL.to_lowercase(), err.message));
            Err(err)
        }
    }
}

/// Deletes a cached record after confirmation.
///
/// ## Returns
/// * `Ok(true)` - deleted and cache reloaded
/// * `Ok(false)` - id not cached, or the operator declined
/// * `Err(AppError)` - backend refused or was unreachable
pub async fn remove_record<R: Cached>(
    app: &mut App,
    prompter: &mut dyn Prompter,
    id: &str,
) -> AppResult<bool> {
    debug!(resource = R::LABEL, id = %id, "remove_record command");

    let Some(name) = R::cache(app).find(id).map(|r| r.display_name().to_string()) else {
        return Ok(false);
    };

    if !prompter.confirm(&format!("Delete {} \"{}\"?", R::LABEL.to_lowercase(), name))? {
        return Ok(false);
    }

    match ResourceRepository::<R>::new(app.backend.clone()).delete(id).await {
        Ok(()) => {
            info!(resource = R::LABEL, id = %id, "Record removed");
            load_records::<R>(app).await;
            app.notices.success(format!("{} deleted successfully", R::LABEL));
            Ok(true)
        }
        Err(err) => {
            let err = AppError::from(err);
            app.notices
                .error(format!("Failed to delete {}", R::LABEL.to_lowercase()));
            Err(err)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
