//! Free-text fields.

use tracing::warn;

use crate::session::{EditSession, FieldKind, SyncOutcome};
use crate::store::PropertyStore;

/// Free text. An absent committed text starts editing from the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField;

impl FieldKind for TextField {
    type Value = Option<String>;
    type Draft = String;

    fn initial_draft(committed: &Option<String>) -> String {
        committed.clone().unwrap_or_default()
    }
}

pub type TextSession = EditSession<TextField>;

impl EditSession<TextField> {
    /// Creates a session for the text stored under `key`.
    pub fn for_prop(store: &PropertyStore, key: &str) -> Self {
        Self::new(store.get(key).map(str::to_string))
    }

    /// Pushes the text currently stored under `key`.
    pub fn sync_prop(&mut self, store: &PropertyStore, key: &str) -> SyncOutcome {
        if !store.contains_key(key) {
            warn!(key, "text property disappeared from snapshot");
        }
        self.sync_committed(store.get(key).map(str::to_string))
    }

    /// Text to show while viewing. Blank text shows `placeholder`; the
    /// stored value stays as it is.
    pub fn display_label<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.committed() {
            Some(text) if !text.trim().is_empty() => text,
            _ => placeholder,
        }
    }
}
