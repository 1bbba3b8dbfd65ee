//! String codecs for block properties.
//!
//! Properties live in the document as plain strings: both the key (name and
//! type tag) and the value. This module converts between those strings and
//! the typed model.

pub mod key;
pub mod value;

pub use key::{count_of_type, decode_key, default_name, encode_key, next_default_name};
pub use value::{format_date, format_value, parse_date, parse_value};
