//! Error types for the block property model.

use thiserror::Error;

use crate::model::PropType;

/// Error decoding a property key into its name and type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("malformed property key {key:?}: missing type separator")]
    MissingSeparator { key: String },

    #[error("malformed property key {key:?}: unknown type tag {tag:?}")]
    UnknownType { key: String, tag: String },
}

impl KeyError {
    /// Returns the raw key that failed to decode.
    pub fn key(&self) -> &str {
        match self {
            KeyError::MissingSeparator { key } | KeyError::UnknownType { key, .. } => key,
        }
    }
}

/// Error interpreting a string-encoded value for its property type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {prop_type} value {value:?}: {reason}")]
pub struct ValueError {
    pub prop_type: PropType,
    pub value: String,
    pub reason: &'static str,
}

/// Error returned by an external mutation sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("sink rejected the write: {0}")]
    Rejected(String),

    #[error("sink is unavailable")]
    Unavailable,
}

/// Error from a property store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("property not found: {0}")]
    NotFound(String),

    #[error("{field} length {len} exceeds limit {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("block already has {max} properties")]
    TooManyProps { max: usize },

    #[error("no free default name for {prop_type} properties")]
    NamesExhausted { prop_type: PropType },

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Error from an editing session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("field is not being edited")]
    NotEditing,

    #[error("field is read-only")]
    ReadOnly,

    #[error("a write of this field is still in flight")]
    Sending,
}

/// Error loading a [`crate::config::DisplayConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid display config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date format {format:?}")]
    DateFormat { format: String },
}

/// Error from confirming an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The session already returned to viewing; the draft is gone.
    #[error("commit was rejected: {0}")]
    Rejected(#[from] SinkError),
}

/// Error from strict validation of a property store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    MalformedKey(#[from] KeyError),

    #[error("property {key:?} holds a value that is not a valid {expected}: {reason}")]
    ValueMismatch {
        key: String,
        expected: PropType,
        reason: &'static str,
    },

    #[error("property {key:?}: {field} length {len} exceeds limit {max}")]
    LengthExceedsLimit {
        key: String,
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("block has {count} properties, limit is {max}")]
    TooManyProps { count: usize, max: usize },
}
