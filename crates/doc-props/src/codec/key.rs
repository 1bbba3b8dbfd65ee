//! Property key encoding/decoding and default naming.
//!
//! A key is `"{name}:{tag}"`. The tag is split off at the last separator,
//! so display names may themselves contain `:`.

use crate::error::KeyError;
use crate::limits::KEY_SEPARATOR;
use crate::model::PropType;

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a display name and type into a property key.
pub fn encode_key(name: &str, prop_type: PropType) -> String {
    let tag = prop_type.tag();
    let mut key = String::with_capacity(name.len() + 1 + tag.len());
    key.push_str(name);
    key.push(KEY_SEPARATOR);
    key.push_str(tag);
    key
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a property key into its display name and type.
pub fn decode_key(key: &str) -> Result<(&str, PropType), KeyError> {
    let (name, tag) = key
        .rsplit_once(KEY_SEPARATOR)
        .ok_or_else(|| KeyError::MissingSeparator {
            key: key.to_string(),
        })?;
    let prop_type = PropType::from_tag(tag).ok_or_else(|| KeyError::UnknownType {
        key: key.to_string(),
        tag: tag.to_string(),
    })?;
    Ok((name, prop_type))
}

// =============================================================================
// DEFAULT NAMES
// =============================================================================

/// Builds a default property name: the capitalized type name, followed by
/// `suffix` when it is non-zero.
pub fn default_name(prop_type: PropType, suffix: usize) -> String {
    if suffix == 0 {
        prop_type.label().to_string()
    } else {
        format!("{}{}", prop_type.label(), suffix)
    }
}

/// Proposes a name for a new property of `prop_type`.
///
/// The suffix is the number of existing properties of that type, so the
/// second `date` property is `Date1` and the third `Date2`. Keys that do not
/// decode are not counted.
pub fn next_default_name<I>(existing: I, prop_type: PropType) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    default_name(prop_type, count_of_type(existing, prop_type))
}

/// Counts the keys that decode to `prop_type`.
pub fn count_of_type<I>(existing: I, prop_type: PropType) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    existing
        .into_iter()
        .filter(|key| matches!(decode_key(key.as_ref()), Ok((_, ty)) if ty == prop_type))
        .count()
}
