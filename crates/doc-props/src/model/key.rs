//! Composite property keys.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::key::{decode_key, encode_key};
use crate::error::KeyError;
use crate::model::PropType;

/// Key of a custom property: a display name joined with a type tag.
///
/// A `PropKey` holds the raw string found in the document, which is not
/// guaranteed to decode. Keys built with [`PropKey::new`] always decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropKey(String);

impl PropKey {
    /// Encodes a display name and type into a key.
    pub fn new(name: &str, prop_type: PropType) -> Self {
        PropKey(encode_key(name, prop_type))
    }

    /// Wraps a raw key read from a document without checking it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        PropKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decodes the key into its display name and type.
    pub fn decode(&self) -> Result<(&str, PropType), KeyError> {
        decode_key(&self.0)
    }

    /// Returns the display name.
    pub fn name(&self) -> Result<&str, KeyError> {
        self.decode().map(|(name, _)| name)
    }

    /// Returns the property type.
    pub fn prop_type(&self) -> Result<PropType, KeyError> {
        self.decode().map(|(_, ty)| ty)
    }
}

impl Borrow<str> for PropKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PropKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropKey {
    fn from(raw: &str) -> Self {
        PropKey::from_raw(raw)
    }
}

impl From<String> for PropKey {
    fn from(raw: String) -> Self {
        PropKey::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_key_decodes() {
        let key = PropKey::new("Due", PropType::Date);
        assert_eq!(key.as_str(), "Due:date");
        assert_eq!(key.name().unwrap(), "Due");
        assert_eq!(key.prop_type().unwrap(), PropType::Date);
    }

    #[test]
    fn test_raw_key_may_be_malformed() {
        let key = PropKey::from_raw("legacy");
        assert!(key.decode().is_err());
        assert_eq!(key.to_string(), "legacy");
    }

    #[test]
    fn test_serde_transparent() {
        let key = PropKey::new("Owner", PropType::User);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"Owner:user\"");
        let back: PropKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
