//! Typed custom properties for document blocks.
//!
//! Blocks in a collaborative document carry user-defined properties next to
//! their built-in fields. The realtime document stores them as a flat bag of
//! strings, keyed by a composite of display name and type tag. This crate is
//! the model layer over that bag:
//!
//! - [`codec`] - encode/decode property keys and values, default naming
//! - [`store`] - the ordered property store and its write-through context
//! - [`session`] - draft/commit editing sessions for text and date fields
//! - [`validate`] - strict checks for imported property bags
//! - [`github`] - info rows of GitHub issue blocks
//!
//! ## Quick Start
//!
//! ```rust
//! use doc_props::{PropType, PropertyStore};
//!
//! let mut store = PropertyStore::new();
//! let first = store.create_default(PropType::Date).unwrap();
//! let second = store.create_default(PropType::Date).unwrap();
//! assert_eq!(first.as_str(), "Date:date");
//! assert_eq!(second.as_str(), "Date1:date");
//!
//! store.set(first.clone(), "2024-05-01").unwrap();
//! let names: Vec<_> = store.props().map(|row| row.name).collect();
//! assert_eq!(names, vec!["Date", "Date1"]);
//! ```
//!
//! The document itself, its synchronization and persistence are external:
//! the crate reads snapshots pushed into it and writes through
//! [`PropertySink`] / [`ValueSink`] implementations.

pub mod codec;
pub mod config;
pub mod error;
pub mod github;
pub mod limits;
pub mod model;
pub mod session;
pub mod sink;
pub mod store;
pub mod validate;

pub use config::DisplayConfig;
pub use error::{
    CommitError, ConfigError, KeyError, SessionError, SinkError, StoreError, ValidationError,
    ValueError,
};
pub use model::{BlockId, PropKey, PropType, PropValue};
pub use session::{DateSession, EditSession, EditState, SyncOutcome, TextSession};
pub use sink::{KeyedSink, PropertySink, ValueSink};
pub use store::{BlockProps, PropChange, PropRow, PropertyStore};
pub use validate::{collect_issues, validate_store};
