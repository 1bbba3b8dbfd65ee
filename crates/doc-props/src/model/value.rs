//! Property types and typed property values.
//!
//! Every custom property stores a string; its type decides how that string
//! is read back.

use std::fmt;

use chrono::{DateTime, Utc};

/// Kinds of custom block properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropType {
    Text,
    Number,
    Date,
    User,
    Status,
    Checkbox,
}

impl PropType {
    /// Every property type, in the order a type picker lists them.
    pub const ALL: [PropType; 6] = [
        PropType::Text,
        PropType::Number,
        PropType::Date,
        PropType::User,
        PropType::Status,
        PropType::Checkbox,
    ];

    /// Parses the type tag used inside property keys.
    pub fn from_tag(tag: &str) -> Option<PropType> {
        match tag {
            "text" => Some(PropType::Text),
            "number" => Some(PropType::Number),
            "date" => Some(PropType::Date),
            "user" => Some(PropType::User),
            "status" => Some(PropType::Status),
            "checkbox" => Some(PropType::Checkbox),
            _ => None,
        }
    }

    /// Returns the type tag used inside property keys.
    pub fn tag(self) -> &'static str {
        match self {
            PropType::Text => "text",
            PropType::Number => "number",
            PropType::Date => "date",
            PropType::User => "user",
            PropType::Status => "status",
            PropType::Checkbox => "checkbox",
        }
    }

    /// Returns the capitalized type name, the base of default property names.
    pub fn label(self) -> &'static str {
        match self {
            PropType::Text => "Text",
            PropType::Number => "Number",
            PropType::Date => "Date",
            PropType::User => "User",
            PropType::Status => "Status",
            PropType::Checkbox => "Checkbox",
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The typed reading of a stored property string.
///
/// `None` payloads mean the stored string was empty.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Free text; empty text is a valid value, not an absent one.
    Text(String),

    /// Finite or infinite 64-bit float (NaN not allowed).
    Number(Option<f64>),

    /// Point in time, normalized to UTC.
    Date(Option<DateTime<Utc>>),

    /// Opaque user identifier, resolved by the member directory.
    User(Option<String>),

    /// Opaque status label.
    Status(Option<String>),

    Checkbox(bool),
}

impl PropValue {
    /// Returns the property type of this value.
    pub fn prop_type(&self) -> PropType {
        match self {
            PropValue::Text(_) => PropType::Text,
            PropValue::Number(_) => PropType::Number,
            PropValue::Date(_) => PropType::Date,
            PropValue::User(_) => PropType::User,
            PropValue::Status(_) => PropType::Status,
            PropValue::Checkbox(_) => PropType::Checkbox,
        }
    }

    /// Returns the neutral value a freshly created property holds.
    pub fn empty(prop_type: PropType) -> PropValue {
        match prop_type {
            PropType::Text => PropValue::Text(String::new()),
            PropType::Number => PropValue::Number(None),
            PropType::Date => PropValue::Date(None),
            PropType::User => PropValue::User(None),
            PropType::Status => PropValue::Status(None),
            PropType::Checkbox => PropValue::Checkbox(false),
        }
    }

    /// Returns true if the value would be shown as an empty cell.
    pub fn is_empty(&self) -> bool {
        match self {
            PropValue::Text(s) => s.trim().is_empty(),
            PropValue::Number(v) => v.is_none(),
            PropValue::Date(v) => v.is_none(),
            PropValue::User(v) | PropValue::Status(v) => v.is_none(),
            PropValue::Checkbox(_) => false,
        }
    }
}
