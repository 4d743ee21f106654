//! Persistent key-value store backing builder flags and schema fragments.
//!
//! A [`Store`] is an `Arc`-shared JSON object. Reads borrow from the shared
//! map; every write ([`merge`](Store::merge), [`without`](Store::without))
//! allocates a fresh map and leaves the receiver untouched, so any number of
//! builders can alias the same snapshot.
//!
//! # Example
//!
//! ```
//! use schematik_core::{MergeMode, Store};
//! use serde_json::json;
//!
//! let base = Store::from_value(json!({ "properties": { "a": { "type": "string" } } }));
//! let partial = json!({ "properties": { "b": { "type": "number" } } });
//!
//! let deep = base.merge(partial.as_object().unwrap(), MergeMode::Deep);
//! assert_eq!(deep.get("properties").unwrap().as_object().unwrap().len(), 2);
//!
//! let shallow = base.merge(partial.as_object().unwrap(), MergeMode::Shallow);
//! assert_eq!(shallow.get("properties").unwrap().as_object().unwrap().len(), 1);
//!
//! // The receiver never changes.
//! assert!(base.get("properties").unwrap().get("b").is_none());
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

/// Merge behavior for [`Store::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Partial values replace existing values wholesale (the default).
    #[default]
    Shallow,
    /// Nested objects present on both sides are merged recursively.
    Deep,
}

impl From<bool> for MergeMode {
    fn from(deep: bool) -> Self {
        if deep { Self::Deep } else { Self::Shallow }
    }
}

/// Immutable, structurally shared JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    entries: Arc<Map<String, Value>>,
}

impl Store {
    /// Creates a store that owns `entries`.
    pub fn new(entries: Map<String, Value>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Creates a store from a JSON value. Non-object values yield an empty store.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(entries) => Self::new(entries),
            _ => Self::default(),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a new store with `partial` merged over the receiver's entries.
    ///
    /// Keys in `partial` win. With [`MergeMode::Deep`], a key holding an
    /// object on both sides is merged recursively instead of replaced.
    /// Arrays are always replaced.
    pub fn merge(&self, partial: &Map<String, Value>, mode: MergeMode) -> Self {
        let mut merged = (*self.entries).clone();
        merge_into(&mut merged, partial, mode);
        Self::new(merged)
    }

    /// Returns a new store without `key`.
    ///
    /// When `key` is absent the result shares the receiver's map.
    pub fn without(&self, key: &str) -> Self {
        if !self.entries.contains_key(key) {
            return self.clone();
        }
        let mut remaining = (*self.entries).clone();
        remaining.remove(key);
        Self::new(remaining)
    }

    /// Returns a deep, independently owned copy of the entries.
    pub fn to_map(&self) -> Map<String, Value> {
        (*self.entries).clone()
    }

    /// Returns `true` when both stores share the same underlying map.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.entries, &b.entries)
    }
}

impl From<Map<String, Value>> for Store {
    fn from(entries: Map<String, Value>) -> Self {
        Self::new(entries)
    }
}

fn merge_into(target: &mut Map<String, Value>, partial: &Map<String, Value>, mode: MergeMode) {
    for (key, incoming) in partial {
        if mode == MergeMode::Deep {
            if let (Some(Value::Object(existing)), Value::Object(nested)) =
                (target.get_mut(key), incoming)
            {
                merge_into(existing, nested, mode);
                continue;
            }
        }
        target.insert(key.clone(), incoming.clone());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_merge_partial_wins_and_receiver_is_unchanged() {
        let base = Store::from_value(json!({ "x": 1, "y": 2 }));
        let merged = base.merge(&object(json!({ "x": 10 })), MergeMode::Shallow);

        assert_eq!(merged.get("x"), Some(&json!(10)));
        assert_eq!(merged.get("y"), Some(&json!(2)));
        assert_eq!(base.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_deep_merge_recurses_into_objects() {
        let base = Store::from_value(json!({ "a": { "b": 1, "c": { "d": 1 } } }));
        let merged = base.merge(&object(json!({ "a": { "c": { "e": 2 } } })), MergeMode::Deep);

        assert_eq!(
            Value::Object(merged.to_map()),
            json!({ "a": { "b": 1, "c": { "d": 1, "e": 2 } } })
        );
    }

    #[test]
    fn test_shallow_merge_replaces_objects() {
        let base = Store::from_value(json!({ "a": { "b": 1 } }));
        let merged = base.merge(&object(json!({ "a": { "c": 2 } })), MergeMode::Shallow);

        assert_eq!(Value::Object(merged.to_map()), json!({ "a": { "c": 2 } }));
    }

    #[test]
    fn test_deep_merge_replaces_arrays_and_scalars() {
        let base = Store::from_value(json!({ "required": ["a"], "a": { "b": 1 } }));
        let merged = base.merge(&object(json!({ "required": ["b"], "a": 5 })), MergeMode::Deep);

        assert_eq!(merged.get("required"), Some(&json!(["b"])));
        assert_eq!(merged.get("a"), Some(&json!(5)));
    }

    #[test]
    fn test_without_drops_key_only_in_result() {
        let base = Store::from_value(json!({ "nullable": true, "other": 1 }));
        let trimmed = base.without("nullable");

        assert!(!trimmed.contains("nullable"));
        assert!(base.contains("nullable"));
        assert_eq!(trimmed.len(), 1);
    }

    #[test]
    fn test_without_missing_key_shares_map() {
        let base = Store::from_value(json!({ "a": 1 }));
        assert!(Store::ptr_eq(&base, &base.without("zzz")));
    }

    #[test]
    fn test_to_map_is_independent() {
        let base = Store::from_value(json!({ "a": { "b": 1 } }));
        let mut copy = base.to_map();
        copy.insert("c".into(), json!(3));

        assert!(!base.contains("c"));
    }
}
