//! Draft/commit editing sessions for single property fields.
//!
//! An [`EditSession`] tracks one field instance through two states:
//!
//! - **Viewing** - the committed value is displayed; there is no draft.
//! - **Editing** - a local draft, initialized from the committed value,
//!   diverges as the user types or picks.
//!
//! The committed value is owned by the document model. The session never
//! updates it on its own: a confirm hands the draft to a [`ValueSink`] and
//! returns to viewing immediately, and the new committed value only arrives
//! when the document pushes it back through [`EditSession::sync_committed`].
//! A push that changes the committed value while editing aborts the edit, so
//! a stale draft never overwrites a newer external value.
//!
//! ```rust
//! use doc_props::session::{EditState, SyncOutcome, TextSession};
//! use doc_props::SinkError;
//!
//! let mut session = TextSession::new(Some("Draft title".to_string()));
//! session.start_editing().unwrap();
//! session.set_draft("Final title".to_string()).unwrap();
//!
//! let mut sent = Vec::new();
//! let mut sink = |v: String| -> Result<(), SinkError> {
//!     sent.push(v);
//!     Ok(())
//! };
//! session.confirm(&mut sink).unwrap();
//! assert_eq!(session.state(), EditState::Viewing);
//!
//! // The document echoes the write back.
//! let outcome = session.sync_committed(Some("Final title".to_string()));
//! assert_eq!(outcome, SyncOutcome::Updated);
//! assert_eq!(sent, vec!["Final title".to_string()]);
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{CommitError, SessionError};
use crate::sink::ValueSink;

pub mod date;
pub mod text;

pub use date::{DateField, DateSession, is_overdue_at};
pub use text::{TextField, TextSession};

/// State of a field instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditState {
    Viewing,
    Editing,
}

/// Result of pushing a committed value into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncOutcome {
    /// The pushed value equals the current committed value.
    Unchanged,
    /// The committed value changed while viewing.
    Updated,
    /// The committed value changed while editing; the draft was dropped.
    EditAborted,
}

/// The kind of value a field edits.
pub trait FieldKind {
    /// Committed value as held by the document (may be absent).
    type Value: Clone + PartialEq + fmt::Debug;

    /// Local draft while editing; also what a confirm sends to the sink.
    type Draft: Clone + fmt::Debug;

    /// Draft to start from; absent committed values give a neutral draft.
    fn initial_draft(committed: &Self::Value) -> Self::Draft;
}

/// Editing session of one field instance.
pub struct EditSession<K: FieldKind> {
    committed: K::Value,
    draft: Option<K::Draft>,
    read_only: bool,
    sending: bool,
}

impl<K: FieldKind> fmt::Debug for EditSession<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("committed", &self.committed)
            .field("draft", &self.draft)
            .field("read_only", &self.read_only)
            .field("sending", &self.sending)
            .finish()
    }
}

impl<K: FieldKind> Clone for EditSession<K> {
    fn clone(&self) -> Self {
        Self {
            committed: self.committed.clone(),
            draft: self.draft.clone(),
            read_only: self.read_only,
            sending: self.sending,
        }
    }
}

impl<K: FieldKind> EditSession<K> {
    /// Creates a session in the viewing state.
    pub fn new(committed: K::Value) -> Self {
        Self {
            committed,
            draft: None,
            read_only: false,
            sending: false,
        }
    }

    /// Creates a session that is already editing (edit-on-start fields).
    pub fn editing(committed: K::Value) -> Self {
        let draft = K::initial_draft(&committed);
        Self {
            committed,
            draft: Some(draft),
            read_only: false,
            sending: false,
        }
    }

    /// Builder form of [`EditSession::set_read_only`].
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.set_read_only(read_only);
        self
    }

    /// Marks the field read-only. Making an editing field read-only drops
    /// the draft.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only && self.draft.take().is_some() {
            debug!("edit discarded: field became read-only");
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Builder form of [`EditSession::set_sending`].
    pub fn with_sending(mut self, sending: bool) -> Self {
        self.set_sending(sending);
        self
    }

    /// Marks a write of this field as in flight. While set, the field can
    /// neither start editing nor commit; an open draft is kept.
    pub fn set_sending(&mut self, sending: bool) {
        self.sending = sending;
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Fails if the field cannot be edited or committed right now.
    fn ensure_writable(&self) -> Result<(), SessionError> {
        if self.read_only {
            Err(SessionError::ReadOnly)
        } else if self.sending {
            Err(SessionError::Sending)
        } else {
            Ok(())
        }
    }

    pub fn state(&self) -> EditState {
        if self.draft.is_some() {
            EditState::Editing
        } else {
            EditState::Viewing
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Returns the last committed value pushed by the document.
    pub fn committed(&self) -> &K::Value {
        &self.committed
    }

    /// Returns the draft, if editing.
    pub fn draft(&self) -> Option<&K::Draft> {
        self.draft.as_ref()
    }

    /// Enters editing with a draft taken from the committed value.
    ///
    /// Calling this while already editing keeps the current draft.
    pub fn start_editing(&mut self) -> Result<&K::Draft, SessionError> {
        self.ensure_writable()?;
        let committed = &self.committed;
        let draft = self.draft.get_or_insert_with(|| {
            debug!("edit started");
            K::initial_draft(committed)
        });
        Ok(&*draft)
    }

    /// Replaces the draft.
    pub fn set_draft(&mut self, value: K::Draft) -> Result<(), SessionError> {
        match self.draft.as_mut() {
            Some(draft) => {
                *draft = value;
                Ok(())
            }
            None => Err(SessionError::NotEditing),
        }
    }

    /// Sends the draft to `sink` and returns to viewing.
    ///
    /// The session leaves editing before the sink is called, so it is back
    /// in viewing whether or not the sink accepts the value. A rejection is
    /// returned as [`CommitError::Rejected`]; it is not retried.
    pub fn confirm<S>(&mut self, sink: &mut S) -> Result<(), CommitError>
    where
        S: ValueSink<K::Draft> + ?Sized,
    {
        self.ensure_writable()?;
        let draft = self.draft.take().ok_or(SessionError::NotEditing)?;
        debug!(draft = ?draft, "edit confirmed");
        sink.submit(draft).map_err(|err| {
            warn!(error = %err, "committed value was rejected");
            CommitError::Rejected(err)
        })
    }

    /// Leaves editing without calling any sink. Returns the discarded draft.
    pub fn cancel(&mut self) -> Option<K::Draft> {
        let draft = self.draft.take();
        if draft.is_some() {
            debug!("edit cancelled");
        }
        draft
    }

    /// Pushes the document's current committed value into the session.
    ///
    /// This is the "committed value changed" callback. A value equal to the
    /// one already held is ignored. A different value replaces it and, if
    /// the field is being edited, ends the edit without calling any sink.
    pub fn sync_committed(&mut self, value: K::Value) -> SyncOutcome {
        if value == self.committed {
            return SyncOutcome::Unchanged;
        }
        self.committed = value;
        match self.draft.take() {
            Some(stale) => {
                info!(stale = ?stale, "committed value changed externally; edit aborted");
                SyncOutcome::EditAborted
            }
            None => SyncOutcome::Updated,
        }
    }
}
