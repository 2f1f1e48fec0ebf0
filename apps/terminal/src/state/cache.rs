//! # Record Caches
//!
//! Local mirrors of backend collections. A cache is only ever replaced
//! wholesale by a reload; writes go to the backend first and the cache
//! catches up on the next load.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open_new() ──► EditForm { mode: New,  draft: blank }                  │
//! │  open_edit(id) ► EditForm { mode: Edit, draft: cached copy }           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  save_record ──► backend ──► load_records ──► replace() + close_form() │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use poslite_client::Resource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit { id: String },
}

/// An open add/edit form.
#[derive(Debug, Clone)]
pub struct EditForm<R> {
    pub mode: FormMode,
    pub draft: R,
}

#[derive(Debug, Clone)]
pub struct RecordCache<R> {
    records: Vec<R>,
    form: Option<EditForm<R>>,
}

impl<R> Default for RecordCache<R> {
    fn default() -> Self {
        RecordCache {
            records: Vec::new(),
            form: None,
        }
    }
}

impl<R: Resource> RecordCache<R> {
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the mirror with a fresh backend listing.
    pub fn replace(&mut self, records: Vec<R>) {
        self.records = records;
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.record_id() == Some(id))
    }

    /// Opens an empty form, discarding any form already open.
    pub fn open_new(&mut self, blank: R) {
        self.form = Some(EditForm {
            mode: FormMode::New,
            draft: blank,
        });
    }

    /// Opens a form pre-filled from the cache. Returns `false` when the id
    /// is not cached.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.find(id).cloned() else {
            return false;
        };
        self.form = Some(EditForm {
            mode: FormMode::Edit { id: id.to_string() },
            draft: record,
        });
        true
    }

    pub fn form(&self) -> Option<&EditForm<R>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm<R>> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }
}
