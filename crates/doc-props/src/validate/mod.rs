//! Strict validation of block property bags.
//!
//! Enumeration through [`PropertyStore::props`] is lenient: malformed keys
//! are skipped. Importers and migration tools use this module instead, to
//! reject a bag outright or to list everything wrong with it.

use crate::codec::parse_value;
use crate::error::ValidationError;
use crate::limits::{MAX_PROP_NAME_LEN, MAX_PROP_VALUE_LEN, MAX_PROPS_PER_BLOCK};
use crate::model::PropKey;
use crate::store::PropertyStore;

/// Validates a whole store, failing on the first problem.
///
/// This checks that:
/// - every key decodes into a name and a known type
/// - every value parses as its key's type
/// - names, values and the property count are within limits
pub fn validate_store(store: &PropertyStore) -> Result<(), ValidationError> {
    check_count(store)?;
    for (key, value) in store.entries() {
        validate_entry(key, value)?;
    }
    Ok(())
}

/// Validates a whole store, collecting every problem.
pub fn collect_issues(store: &PropertyStore) -> Vec<ValidationError> {
    let mut issues: Vec<ValidationError> = check_count(store).err().into_iter().collect();
    issues.extend(
        store
            .entries()
            .filter_map(|(key, value)| validate_entry(key, value).err()),
    );
    issues
}

/// Validates a single `(key, value)` entry.
pub fn validate_entry(key: &PropKey, value: &str) -> Result<(), ValidationError> {
    let (name, prop_type) = key.decode()?;
    if name.len() > MAX_PROP_NAME_LEN {
        return Err(ValidationError::LengthExceedsLimit {
            key: key.to_string(),
            field: "name",
            len: name.len(),
            max: MAX_PROP_NAME_LEN,
        });
    }
    if value.len() > MAX_PROP_VALUE_LEN {
        return Err(ValidationError::LengthExceedsLimit {
            key: key.to_string(),
            field: "value",
            len: value.len(),
            max: MAX_PROP_VALUE_LEN,
        });
    }
    parse_value(prop_type, value).map_err(|err| ValidationError::ValueMismatch {
        key: key.to_string(),
        expected: prop_type,
        reason: err.reason,
    })?;
    Ok(())
}

fn check_count(store: &PropertyStore) -> Result<(), ValidationError> {
    if store.len() > MAX_PROPS_PER_BLOCK {
        return Err(ValidationError::TooManyProps {
            count: store.len(),
            max: MAX_PROPS_PER_BLOCK,
        });
    }
    Ok(())
}
