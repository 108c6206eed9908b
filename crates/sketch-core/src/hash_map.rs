use std::sync::Arc;

use indexmap::IndexMap;

use crate::ast::Value;
use crate::error::SketchError;

/// A hash-map key. Only ints, strings, symbols, booleans and lists of those
/// may be used as keys; anything else fails the key-restriction check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    String(String),
    Symbol(String),
    Bool(bool),
    List(Vec<Key>),
}

impl Key {
    /// Converts a value to a key, or fails with a type error if the value's
    /// variant can't be used as one.
    pub fn from_value(value: &Value) -> Result<Key, SketchError> {
        match value {
            Value::Int(n) => Ok(Key::Int(*n)),
            Value::String(s) => Ok(Key::String(s.clone())),
            Value::Symbol(s) => Ok(Key::Symbol(s.clone())),
            Value::Bool(b) => Ok(Key::Bool(*b)),
            Value::List(items) => {
                let keys = items
                    .iter()
                    .map(Key::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Key::List(keys))
            }
            other => Err(SketchError::type_mismatch_msg(format!(
                "hash map key {} has type {} - can't use this as a hash map key",
                crate::value_format::format_value(other),
                other.type_name()
            ))),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(n) => Value::Int(*n),
            Key::String(s) => Value::String(s.clone()),
            Key::Symbol(s) => Value::Symbol(s.clone()),
            Key::Bool(b) => Value::Bool(*b),
            Key::List(keys) => Value::list(keys.iter().map(Key::to_value).collect()),
        }
    }
}

/// A logically immutable hash map. `set` returns a new map, sharing storage
/// with the receiver until written. Iteration follows insertion order, so
/// printing is deterministic.
#[derive(Clone, Default)]
pub struct SketchMap {
    entries: Arc<IndexMap<Key, Value>>,
}

impl SketchMap {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(IndexMap::new()),
        }
    }

    /// Builds a map from a flat key/value sequence, as produced by a `{…}`
    /// literal. Fails if the item count is odd or a key is restricted.
    pub fn from_pairs(items: &[Value]) -> Result<Self, SketchError> {
        if items.len() % 2 != 0 {
            return Err(SketchError::parse(
                "hash maps must contain an even number of forms, alternating keys and values",
            ));
        }
        let mut entries = IndexMap::new();
        for pair in items.chunks(2) {
            let key = Key::from_value(&pair[0])?;
            entries.insert(key, pair[1].clone());
        }
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    pub fn set(&self, key: Key, value: Value) -> SketchMap {
        let mut entries = self.entries.clone();
        Arc::make_mut(&mut entries).insert(key, value);
        SketchMap { entries }
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }
}

impl PartialEq for SketchMap {
    fn eq(&self, other: &Self) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.entries
            .iter()
            .all(|(k, v)| other.entries.get(k) == Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_does_not_mutate_receiver() {
        let m = SketchMap::new();
        let m2 = m.set(Key::Int(1), Value::Int(2));
        assert!(m.is_empty());
        assert_eq!(m2.get(&Key::Int(1)), Some(&Value::Int(2)));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let m = SketchMap::new()
            .set(Key::Int(3), Value::Int(30))
            .set(Key::Int(1), Value::Int(10))
            .set(Key::Int(2), Value::Int(20));
        let keys: Vec<_> = m.keys().cloned().collect();
        assert_eq!(keys, vec![Key::Int(3), Key::Int(1), Key::Int(2)]);
    }

    #[test]
    fn function_keys_are_rejected() {
        let f = Value::builtin("f", crate::ast::Arity::Exactly(0), |_| Ok(Value::Nil));
        assert!(Key::from_value(&f).is_err());
    }

    #[test]
    fn odd_entry_count_is_an_error() {
        let items = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert!(SketchMap::from_pairs(&items).is_err());
    }
}
