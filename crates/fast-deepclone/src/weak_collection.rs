//! WeakMap and WeakSet
//!
//! Entries hold their key weakly: a key is identified by the address of its
//! base object and kept as a `Weak` handle, so the collection never keeps a
//! key alive. Contents are not enumerable.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{ValueError, ValueResult};
use crate::object::JsObject;
use crate::value::Value;

struct Entry {
    key: Weak<JsObject>,
    value: Value,
}

/// Ephemeron storage shared by WeakMap and WeakSet
#[derive(Default)]
struct EphemeronTable {
    entries: RwLock<FxHashMap<usize, Entry>>,
}

fn weak_key(key: &Value) -> ValueResult<(usize, Weak<JsObject>)> {
    key.heap_ref()
        .and_then(|heap| heap.base_object())
        .map(|base| (Arc::as_ptr(base) as usize, Arc::downgrade(base)))
        .ok_or_else(|| ValueError::type_error(format!("invalid value used as weak key: {key:?}")))
}

impl EphemeronTable {
    fn get(&self, key: &Value) -> Option<Value> {
        let (addr, _) = weak_key(key).ok()?;
        let entries = self.entries.read();
        let entry = entries.get(&addr)?;
        (entry.key.strong_count() > 0).then(|| entry.value.clone())
    }

    fn set(&self, key: &Value, value: Value) -> ValueResult<()> {
        let (addr, weak) = weak_key(key)?;
        let mut entries = self.entries.write();
        entries.retain(|_, entry| entry.key.strong_count() > 0);
        entries.insert(addr, Entry { key: weak, value });
        Ok(())
    }

    fn delete(&self, key: &Value) -> bool {
        match weak_key(key) {
            Ok((addr, _)) => self.entries.write().remove(&addr).is_some(),
            Err(_) => false,
        }
    }

    fn live_count(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|entry| entry.key.strong_count() > 0)
            .count()
    }
}

/// A JavaScript `WeakMap`
pub struct JsWeakMap {
    /// Own properties and prototype
    pub object: Arc<JsObject>,
    table: EphemeronTable,
}

impl JsWeakMap {
    /// Create an empty WeakMap
    pub fn new(prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            object: Arc::new(JsObject::new(prototype)),
            table: EphemeronTable::default(),
        }
    }

    /// `get()`
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.table.get(key)
    }

    /// `has()`
    pub fn has(&self, key: &Value) -> bool {
        self.table.get(key).is_some()
    }

    /// `set()`; fails for primitive keys
    pub fn set(&self, key: &Value, value: Value) -> ValueResult<()> {
        self.table.set(key, value)
    }

    /// `delete()`
    pub fn delete(&self, key: &Value) -> bool {
        self.table.delete(key)
    }

    /// Entries whose key is still alive. Not observable from script.
    pub fn live_count(&self) -> usize {
        self.table.live_count()
    }
}

impl std::fmt::Debug for JsWeakMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WeakMap { <items unknown> }")
    }
}

/// A JavaScript `WeakSet`
pub struct JsWeakSet {
    /// Own properties and prototype
    pub object: Arc<JsObject>,
    table: EphemeronTable,
}

impl JsWeakSet {
    /// Create an empty WeakSet
    pub fn new(prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            object: Arc::new(JsObject::new(prototype)),
            table: EphemeronTable::default(),
        }
    }

    /// `add()`; fails for primitive values
    pub fn add(&self, value: &Value) -> ValueResult<()> {
        self.table.set(value, Value::boolean(true))
    }

    /// `has()`
    pub fn has(&self, value: &Value) -> bool {
        self.table.get(value).is_some()
    }

    /// `delete()`
    pub fn delete(&self, value: &Value) -> bool {
        self.table.delete(value)
    }

    /// Entries whose key is still alive. Not observable from script.
    pub fn live_count(&self) -> usize {
        self.table.live_count()
    }
}

impl std::fmt::Debug for JsWeakSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WeakSet { <items unknown> }")
    }
}
