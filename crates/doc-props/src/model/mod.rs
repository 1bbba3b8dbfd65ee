//! Data model types for block properties.
//!
//! This module contains the core types for representing a block's custom
//! properties:
//! - Block identifiers (UUIDs)
//! - Property keys (display name + type tag)
//! - Property types and their typed values

pub mod id;
pub mod key;
pub mod value;

pub use id::{BlockId, format_block_id, parse_block_id};
pub use key::PropKey;
pub use value::{PropType, PropValue};
