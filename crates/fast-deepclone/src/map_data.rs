//! Map and Set (ES2023 §24.1, §24.2).
//!
//! Keys use SameValueZero semantics via [`MapKey`]; entries keep insertion
//! order, and deleting an entry does not disturb the order of the rest.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::object::JsObject;
use crate::value::Value;

// ============================================================================
// MapKey
// ============================================================================

/// Value wrapper with SameValueZero `Hash`/`Eq`, used for Map and Set keys.
#[derive(Clone, Debug)]
pub struct MapKey(pub Value);

impl MapKey {
    /// Returns a reference to the underlying `Value`.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consumes the `MapKey` and returns the underlying `Value`.
    pub fn into_value(self) -> Value {
        self.0
    }
}

const HASH_TAG_UNDEFINED: u8 = 0;
const HASH_TAG_NULL: u8 = 1;
const HASH_TAG_BOOL: u8 = 2;
const HASH_TAG_NUMBER: u8 = 3;
const HASH_TAG_STRING: u8 = 4;
const HASH_TAG_BIGINT: u8 = 5;
const HASH_TAG_HEAP: u8 = 6;

/// Normalize a float for SameValueZero hashing: -0 → +0, NaN → canonical NaN bits.
fn normalize_float_bits(n: f64) -> u64 {
    if n == 0.0 {
        0u64
    } else if n.is_nan() {
        0x7FF8_0000_0000_0000u64
    } else {
        n.to_bits()
    }
}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Value::Undefined => HASH_TAG_UNDEFINED.hash(state),
            Value::Null => HASH_TAG_NULL.hash(state),
            Value::Boolean(b) => {
                HASH_TAG_BOOL.hash(state);
                b.hash(state);
            }
            Value::Number(n) => {
                HASH_TAG_NUMBER.hash(state);
                normalize_float_bits(*n).hash(state);
            }
            Value::String(s) => {
                HASH_TAG_STRING.hash(state);
                s.hash(state);
            }
            Value::BigInt(b) => {
                HASH_TAG_BIGINT.hash(state);
                b.hash(state);
            }
            Value::Heap(h) => {
                HASH_TAG_HEAP.hash(state);
                h.identity().hash(state);
            }
        }
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_value_zero(&other.0)
    }
}

impl Eq for MapKey {}

// ============================================================================
// MapData / SetData
// ============================================================================

/// Internal storage for a JavaScript `Map`.
#[derive(Default)]
pub struct MapData {
    entries: RwLock<IndexMap<MapKey, Value, FxBuildHasher>>,
}

impl MapData {
    /// Create an empty MapData.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.entries.read().len()
    }

    /// Get the value associated with `key`, or `None`.
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.entries.read().get(&MapKey(key.clone())).cloned()
    }

    /// Returns `true` if `key` exists.
    pub fn has(&self, key: &Value) -> bool {
        self.entries.read().contains_key(&MapKey(key.clone()))
    }

    /// Insert or update `key` → `value`. Returns `true` if this was an update.
    /// Updates keep the entry's original position.
    pub fn set(&self, key: Value, value: Value) -> bool {
        self.entries.write().insert(MapKey(key), value).is_some()
    }

    /// Delete `key`. Returns `true` if it existed.
    pub fn delete(&self, key: &Value) -> bool {
        self.entries
            .write()
            .shift_remove(&MapKey(key.clone()))
            .is_some()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Snapshot of all entries in insertion order.
    /// The lock is released before returning.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.value().clone(), v.clone()))
            .collect()
    }
}

impl std::fmt::Debug for MapData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapData(size={})", self.size())
    }
}

/// Internal storage for a JavaScript `Set`.
#[derive(Default)]
pub struct SetData {
    values: RwLock<IndexSet<MapKey, FxBuildHasher>>,
}

impl SetData {
    /// Create an empty SetData.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.values.read().len()
    }

    /// Returns `true` if `value` is present.
    pub fn has(&self, value: &Value) -> bool {
        self.values.read().contains(&MapKey(value.clone()))
    }

    /// Add `value`. Returns `true` if it was not already present.
    pub fn add(&self, value: Value) -> bool {
        self.values.write().insert(MapKey(value))
    }

    /// Delete `value`. Returns `true` if it existed.
    pub fn delete(&self, value: &Value) -> bool {
        self.values.write().shift_remove(&MapKey(value.clone()))
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.values.write().clear();
    }

    /// Snapshot of all values in insertion order.
    pub fn values(&self) -> Vec<Value> {
        self.values.read().iter().map(|k| k.value().clone()).collect()
    }
}

impl std::fmt::Debug for SetData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SetData(size={})", self.size())
    }
}

// ============================================================================
// JsMap / JsSet
// ============================================================================

/// A JavaScript `Map` instance
#[derive(Debug)]
pub struct JsMap {
    /// Own properties and prototype (a subclass prototype for `class X extends Map`)
    pub object: Arc<JsObject>,
    data: MapData,
}

impl JsMap {
    /// Create an empty Map
    pub fn new(prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            object: Arc::new(JsObject::new(prototype)),
            data: MapData::new(),
        }
    }

    /// Create a Map from entries, in order
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Value, Value)>,
        prototype: Option<Arc<JsObject>>,
    ) -> Self {
        let map = Self::new(prototype);
        for (key, value) in entries {
            map.data.set(key, value);
        }
        map
    }

    /// Entry storage
    pub fn data(&self) -> &MapData {
        &self.data
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.data.size()
    }
}

/// A JavaScript `Set` instance
#[derive(Debug)]
pub struct JsSet {
    /// Own properties and prototype
    pub object: Arc<JsObject>,
    data: SetData,
}

impl JsSet {
    /// Create an empty Set
    pub fn new(prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            object: Arc::new(JsObject::new(prototype)),
            data: SetData::new(),
        }
    }

    /// Create a Set from values, in order
    pub fn from_values(
        values: impl IntoIterator<Item = Value>,
        prototype: Option<Arc<JsObject>>,
    ) -> Self {
        let set = Self::new(prototype);
        for value in values {
            set.data.add(value);
        }
        set
    }

    /// Value storage
    pub fn data(&self) -> &SetData {
        &self.data
    }

    /// Number of values
    pub fn size(&self) -> usize {
        self.data.size()
    }
}
