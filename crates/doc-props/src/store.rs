//! Ordered, typed property storage for a single block.
//!
//! [`PropertyStore`] is the local mirror of a block's property bag: an
//! insertion-ordered map from [`PropKey`] to the stored string. The
//! authoritative copy lives in the realtime document; [`BlockProps`] borrows
//! both for one document lifetime and writes through to it.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::codec::{count_of_type, default_name, format_value, parse_value};
use crate::error::{StoreError, ValueError};
use crate::limits::{
    MAX_DEFAULT_NAME_PROBES, MAX_PROP_NAME_LEN, MAX_PROP_VALUE_LEN, MAX_PROPS_PER_BLOCK,
};
use crate::model::{BlockId, PropKey, PropType, PropValue};
use crate::sink::{KeyedSink, PropertySink};

/// A decoded property, as listed in a block's info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropRow<'a> {
    pub key: &'a PropKey,
    pub name: &'a str,
    pub prop_type: PropType,
    pub value: &'a str,
}

/// A difference between two snapshots of a property bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropChange {
    Added(PropKey),
    Updated(PropKey),
    Removed(PropKey),
}

impl PropChange {
    pub fn key(&self) -> &PropKey {
        match self {
            PropChange::Added(key) | PropChange::Updated(key) | PropChange::Removed(key) => key,
        }
    }
}

/// Insertion-ordered property bag of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    entries: IndexMap<PropKey, String>,
}

impl PropertyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a store from ordered `(key, value)` pairs.
    ///
    /// A repeated key keeps its first position and its last value.
    pub fn from_snapshot<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<PropKey>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries }
    }

    /// Hydrates a store from a JSON object of string values, keeping the
    /// object's member order.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let entries: IndexMap<PropKey, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Serializes the store as a JSON object in entry order.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the stored string for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, interpreted by the key's type.
    pub fn get_typed(&self, key: &str) -> Result<PropValue, StoreError> {
        let raw = self
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let (_, prop_type) = crate::codec::decode_key(key)?;
        Ok(parse_value(prop_type, raw)?)
    }

    /// Iterates over all entries in insertion order, malformed keys included.
    pub fn entries(&self) -> impl Iterator<Item = (&PropKey, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &PropKey> + '_ {
        self.entries.keys()
    }

    /// Iterates over the entries whose keys decode, in insertion order.
    ///
    /// Entries with malformed keys are skipped.
    pub fn props(&self) -> impl Iterator<Item = PropRow<'_>> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, value)| match key.decode() {
                Ok((name, prop_type)) => Some(PropRow {
                    key,
                    name,
                    prop_type,
                    value: value.as_str(),
                }),
                Err(err) => {
                    warn!(key = %key, error = %err, "skipping malformed property key");
                    None
                }
            })
    }

    /// Inserts or replaces a property value.
    ///
    /// New keys are appended; existing keys keep their position.
    pub fn set(&mut self, key: impl Into<PropKey>, value: impl Into<String>) -> Result<(), StoreError> {
        let key = key.into();
        let value = value.into();
        self.check_write(&key, &value)?;
        debug!(key = %key, len = value.len(), "set property");
        self.entries.insert(key, value);
        Ok(())
    }

    /// Stores a typed value under `key`; the value's type must match the key's.
    pub fn set_typed(&mut self, key: PropKey, value: &PropValue) -> Result<(), StoreError> {
        let prop_type = key.prop_type()?;
        if prop_type != value.prop_type() {
            return Err(StoreError::Value(ValueError {
                prop_type,
                value: format_value(value),
                reason: "value type does not match the key's type",
            }));
        }
        self.set(key, format_value(value))
    }

    /// Computes the key a new default property of `prop_type` would get.
    ///
    /// The name follows [`crate::codec::next_default_name`]; if that key is
    /// already taken (a property was renamed onto it) the suffix is bumped
    /// until the key is free.
    pub fn default_key(&self, prop_type: PropType) -> Result<PropKey, StoreError> {
        let count = count_of_type(self.entries.keys(), prop_type);
        (count..count + MAX_DEFAULT_NAME_PROBES)
            .map(|suffix| PropKey::new(&default_name(prop_type, suffix), prop_type))
            .find(|key| !self.entries.contains_key(key))
            .ok_or(StoreError::NamesExhausted { prop_type })
    }

    /// Creates an empty property of `prop_type` under a fresh default name.
    pub fn create_default(&mut self, prop_type: PropType) -> Result<PropKey, StoreError> {
        let key = self.default_key(prop_type)?;
        self.set(key.clone(), String::new())?;
        Ok(key)
    }

    /// Replaces the whole bag with a newer snapshot and reports what changed.
    pub fn apply_snapshot<I, K, V>(&mut self, pairs: I) -> Vec<PropChange>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<PropKey>,
        V: Into<String>,
    {
        let next = Self::from_snapshot(pairs).entries;
        let mut changes = Vec::new();
        for (key, value) in &next {
            match self.entries.get(key) {
                None => changes.push(PropChange::Added(key.clone())),
                Some(old) if old != value => changes.push(PropChange::Updated(key.clone())),
                Some(_) => {}
            }
        }
        for key in self.entries.keys() {
            if !next.contains_key(key) {
                changes.push(PropChange::Removed(key.clone()));
            }
        }
        debug!(changes = changes.len(), "applied property snapshot");
        self.entries = next;
        changes
    }

    /// Checks the limits a write of `value` under `key` must respect.
    fn check_write(&self, key: &PropKey, value: &str) -> Result<(), StoreError> {
        if value.len() > MAX_PROP_VALUE_LEN {
            return Err(StoreError::LengthExceedsLimit {
                field: "value",
                len: value.len(),
                max: MAX_PROP_VALUE_LEN,
            });
        }
        if let Ok(name) = key.name() {
            if name.len() > MAX_PROP_NAME_LEN {
                return Err(StoreError::LengthExceedsLimit {
                    field: "name",
                    len: name.len(),
                    max: MAX_PROP_NAME_LEN,
                });
            }
        }
        if !self.entries.contains_key(key) && self.entries.len() >= MAX_PROPS_PER_BLOCK {
            return Err(StoreError::TooManyProps {
                max: MAX_PROPS_PER_BLOCK,
            });
        }
        Ok(())
    }
}

// =============================================================================
// DOCUMENT CONTEXT
// =============================================================================

/// Read/write access to one block's properties for one document lifetime.
///
/// Writes go to the external sink first and are mirrored into the local
/// store only once the sink accepts them.
#[derive(Debug)]
pub struct BlockProps<'d, S: ?Sized> {
    block: BlockId,
    store: &'d mut PropertyStore,
    sink: &'d mut S,
}

impl<'d, S: PropertySink + ?Sized> BlockProps<'d, S> {
    pub fn new(block: BlockId, store: &'d mut PropertyStore, sink: &'d mut S) -> Self {
        Self { block, store, sink }
    }

    pub fn block(&self) -> BlockId {
        self.block
    }

    pub fn store(&self) -> &PropertyStore {
        self.store
    }

    /// Writes a property value through the sink.
    ///
    /// On sink failure the local store is left untouched.
    pub fn set(&mut self, key: PropKey, value: &str) -> Result<(), StoreError> {
        self.store.check_write(&key, value)?;
        if let Err(err) = self.sink.set_prop(&key, value) {
            warn!(block = %self.block, key = %key, error = %err, "property write rejected");
            return Err(err.into());
        }
        self.store.set(key, value)
    }

    /// Creates an empty property of `prop_type` under a fresh default name.
    pub fn create_default(&mut self, prop_type: PropType) -> Result<PropKey, StoreError> {
        let key = self.store.default_key(prop_type)?;
        debug!(block = %self.block, key = %key, "creating default property");
        self.set(key.clone(), "")?;
        Ok(key)
    }

    /// Returns a sink that commits editing-session values to `key`.
    pub fn sink_for(&mut self, key: PropKey) -> KeyedSink<'_, S> {
        KeyedSink::new(key, &mut *self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{KeyError, SinkError};

    fn key(name: &str, ty: PropType) -> PropKey {
        PropKey::new(name, ty)
    }

    #[test]
    fn test_set_appends_new_key() {
        let mut store = PropertyStore::new();
        store.set(key("A", PropType::Text), "1").unwrap();
        store.set(key("B", PropType::Text), "2").unwrap();
        let entries: Vec<_> = store.entries().collect();
        assert_eq!(entries.last(), Some(&(&key("B", PropType::Text), "2")));
    }

    #[test]
    fn test_set_existing_key_keeps_position() {
        let mut store = PropertyStore::from_snapshot([("A:text", "1"), ("B:text", "2")]);
        store.set("A:text", "updated").unwrap();
        let entries: Vec<_> = store.entries().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(entries, vec![("A:text", "updated"), ("B:text", "2")]);
    }

    #[test]
    fn test_create_default_twice() {
        let mut store = PropertyStore::new();
        let first = store.create_default(PropType::Date).unwrap();
        let second = store.create_default(PropType::Date).unwrap();
        assert_eq!(first.name().unwrap(), "Date");
        assert_eq!(second.name().unwrap(), "Date1");
        assert_eq!(store.get(first.as_str()), Some(""));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_default_skips_taken_name() {
        // One date property that was renamed onto the next default name.
        let mut store = PropertyStore::from_snapshot([("Date1:date", "")]);
        let created = store.create_default(PropType::Date).unwrap();
        assert_eq!(created.as_str(), "Date2:date");
    }

    #[test]
    fn test_props_skips_malformed_keys() {
        let store = PropertyStore::from_snapshot([
            ("Owner:user", "u1"),
            ("legacy", "x"),
            ("Mood:feeling", "ok"),
            ("Done:checkbox", "true"),
        ]);
        let names: Vec<_> = store.props().map(|row| row.name).collect();
        assert_eq!(names, vec!["Owner", "Done"]);
        assert_eq!(store.entries().count(), 4);
    }

    #[test]
    fn test_get_typed() {
        let store = PropertyStore::from_snapshot([("Points:number", "5"), ("bad", "1")]);
        assert_eq!(
            store.get_typed("Points:number").unwrap(),
            PropValue::Number(Some(5.0))
        );
        assert!(matches!(
            store.get_typed("bad"),
            Err(StoreError::Key(KeyError::MissingSeparator { .. }))
        ));
        assert!(matches!(
            store.get_typed("Missing:text"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_set_typed_rejects_mismatch() {
        let mut store = PropertyStore::new();
        let result = store.set_typed(key("Done", PropType::Checkbox), &PropValue::Number(Some(1.0)));
        assert!(matches!(result, Err(StoreError::Value(_))));
        store
            .set_typed(key("Done", PropType::Checkbox), &PropValue::Checkbox(true))
            .unwrap();
        assert_eq!(store.get("Done:checkbox"), Some("true"));
    }

    #[test]
    fn test_value_limit() {
        let mut store = PropertyStore::new();
        let big = "x".repeat(MAX_PROP_VALUE_LEN + 1);
        let result = store.set(key("Notes", PropType::Text), big);
        assert!(matches!(
            result,
            Err(StoreError::LengthExceedsLimit { field: "value", .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let json = r#"{"Zeta:text":"z","Alpha:date":"","Mid:number":"2"}"#;
        let store = PropertyStore::from_json(json).unwrap();
        let keys: Vec<_> = store.keys().map(PropKey::as_str).collect();
        assert_eq!(keys, vec!["Zeta:text", "Alpha:date", "Mid:number"]);
        assert_eq!(store.to_json().unwrap(), json);
    }

    #[test]
    fn test_from_json_rejects_non_string_values() {
        assert!(matches!(
            PropertyStore::from_json(r#"{"A:number": 5}"#),
            Err(StoreError::Snapshot(_))
        ));
    }

    #[test]
    fn test_apply_snapshot_reports_changes() {
        let mut store = PropertyStore::from_snapshot([("A:text", "1"), ("B:text", "2")]);
        let changes = store.apply_snapshot([("B:text", "2"), ("A:text", "changed"), ("C:date", "")]);
        assert_eq!(
            changes,
            vec![
                PropChange::Updated(PropKey::from("A:text")),
                PropChange::Added(PropKey::from("C:date")),
            ]
        );
        let changes = store.apply_snapshot([("C:date", "")]);
        let removed: Vec<_> = changes.iter().map(|c| c.key().as_str()).collect();
        assert_eq!(removed, vec!["B:text", "A:text"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_block_props_write_through() {
        let mut store = PropertyStore::new();
        let mut remote: Vec<(String, String)> = Vec::new();
        let mut sink = |k: &PropKey, v: &str| -> Result<(), SinkError> {
            remote.push((k.to_string(), v.to_string()));
            Ok(())
        };
        {
            let mut props = BlockProps::new(BlockId::NIL, &mut store, &mut sink);
            let created = props.create_default(PropType::Status).unwrap();
            props.set(created, "Open").unwrap();
        }
        assert_eq!(store.get("Status:status"), Some("Open"));
        assert_eq!(
            remote,
            vec![
                ("Status:status".to_string(), String::new()),
                ("Status:status".to_string(), "Open".to_string()),
            ]
        );
    }

    #[test]
    fn test_block_props_rejected_write_leaves_store() {
        let mut store = PropertyStore::from_snapshot([("A:text", "old")]);
        let mut sink =
            |_: &PropKey, _: &str| -> Result<(), SinkError> { Err(SinkError::Rejected("offline".into())) };
        let mut props = BlockProps::new(BlockId::NIL, &mut store, &mut sink);
        let result = props.set(PropKey::from("A:text"), "new");
        assert!(matches!(result, Err(StoreError::Sink(SinkError::Rejected(_)))));
        assert_eq!(props.store().get("A:text"), Some("old"));
    }
}
