//! Deep clone and deep copy
//!
//! Walks a value graph and produces an independent duplicate of every plain
//! object and array reachable from the root.
//!
//! Key features:
//! - Handles circular references
//! - Preserves object identity within a clone operation: a node reachable
//!   through several paths is cloned once
//! - Clone mode shares special built-ins (Map, Set, buffers, Date, RegExp);
//!   copy mode duplicates them, keeping their prototype and own properties
//! - Never fails: anything it cannot duplicate is shared by reference

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::array_buffer::JsArrayBuffer;
use crate::classify::{ClonePolicy, classify, policy};
use crate::data_view::JsDataView;
use crate::date::JsDate;
use crate::map_data::{JsMap, JsSet};
use crate::object::{JsObject, PropertyDescriptor};
use crate::options::{CloneMode, CloneOptions};
use crate::regexp::JsRegExp;
use crate::typed_array::JsTypedArray;
use crate::value::{HeapRef, Value};

/// Counters collected while cloning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneStats {
    /// Heap nodes reached (including identity map hits)
    pub visited: usize,
    /// Objects and arrays allocated
    pub structural: usize,
    /// Built-ins duplicated in copy mode
    pub copied: usize,
    /// Heap nodes returned by reference
    pub shared: usize,
    /// Lookups answered by the identity map (shared or circular references)
    pub identity_hits: usize,
}

/// Performs deep clones
///
/// The identity map lives as long as the cloner, so roots cloned through the
/// same `DeepCloner` keep their mutual sharing. [`deep_clone`] uses a fresh
/// cloner per call.
pub struct DeepCloner {
    /// Map from source pointer to `(source, clone)`. Holding the source keeps
    /// its address from being reused by a later root while the entry exists.
    memory: FxHashMap<usize, (Value, Value)>,
    mode: CloneMode,
    stats: CloneStats,
}

impl DeepCloner {
    /// Create a new cloner
    pub fn new(options: &CloneOptions) -> Self {
        Self {
            memory: FxHashMap::default(),
            mode: options.mode,
            stats: CloneStats::default(),
        }
    }

    /// Clone a value
    pub fn clone(&mut self, value: &Value) -> Value {
        let span = tracing::trace_span!("deep_clone", mode = self.mode.as_str());
        let _enter = span.enter();

        let result = self.internal_clone(value);

        tracing::debug!(
            visited = self.stats.visited,
            structural = self.stats.structural,
            copied = self.stats.copied,
            shared = self.stats.shared,
            identity_hits = self.stats.identity_hits,
            "deep clone finished"
        );
        result
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &CloneStats {
        &self.stats
    }

    /// Forget every clone produced so far
    pub fn reset(&mut self) {
        self.memory.clear();
        self.stats = CloneStats::default();
    }

    fn internal_clone(&mut self, value: &Value) -> Value {
        // Primitives are copied by value
        let Some(heap) = value.heap_ref() else {
            return value.clone();
        };

        self.stats.visited += 1;
        let ptr = heap.identity();

        // Check for circular or shared reference
        if let Some((_, cloned)) = self.memory.get(&ptr) {
            self.stats.identity_hits += 1;
            return cloned.clone();
        }

        match (policy(classify(value), self.mode), heap) {
            (ClonePolicy::Structural, HeapRef::Object(obj)) => self.clone_object(ptr, value, obj),
            (ClonePolicy::Structural, HeapRef::Array(arr)) => self.clone_array(ptr, value, arr),
            (ClonePolicy::Copy, HeapRef::Map(map)) => self.copy_map(ptr, value, map),
            (ClonePolicy::Copy, HeapRef::Set(set)) => self.copy_set(ptr, value, set),
            (ClonePolicy::Copy, HeapRef::ArrayBuffer(ab)) => self.copy_array_buffer(ptr, value, ab),
            (ClonePolicy::Copy, HeapRef::TypedArray(ta)) => self.copy_typed_array(ptr, value, ta),
            (ClonePolicy::Copy, HeapRef::DataView(dv)) => self.copy_data_view(ptr, value, dv),
            (ClonePolicy::Copy, HeapRef::Date(date)) => self.copy_date(ptr, value, date),
            (ClonePolicy::Copy, HeapRef::RegExp(re)) => self.copy_regexp(ptr, value, re),
            _ => self.share(ptr, value),
        }
    }

    fn share(&mut self, ptr: usize, value: &Value) -> Value {
        self.stats.shared += 1;
        self.register(ptr, value, value.clone())
    }

    fn register(&mut self, ptr: usize, source: &Value, cloned: Value) -> Value {
        self.memory.insert(ptr, (source.clone(), cloned.clone()));
        cloned
    }

    fn clone_object(&mut self, ptr: usize, value: &Value, obj: &Arc<JsObject>) -> Value {
        let new_obj = Arc::new(JsObject::new(obj.prototype().cloned()));

        // Register before cloning properties (to handle circular refs)
        self.register(ptr, value, Value::object(new_obj.clone()));
        self.stats.structural += 1;

        self.clone_members(obj, &new_obj);
        Value::object(new_obj)
    }

    fn clone_array(&mut self, ptr: usize, value: &Value, arr: &Arc<JsObject>) -> Value {
        let new_arr = Arc::new(JsObject::array_with_prototype(
            arr.array_length(),
            arr.prototype().cloned(),
        ));

        // Register before cloning elements
        self.register(ptr, value, Value::array(new_arr.clone()));
        self.stats.structural += 1;

        self.clone_members(arr, &new_arr);
        Value::array(new_arr)
    }

    /// Data members are cloned under their original attributes, whatever
    /// the key kind. Accessors are carried over without running them. Holes
    /// stay holes.
    fn clone_members(&mut self, source: &JsObject, target: &JsObject) {
        for (key, desc) in source.own_properties() {
            let desc = match desc {
                PropertyDescriptor::Data { value, attributes } => PropertyDescriptor::Data {
                    value: self.internal_clone(&value),
                    attributes,
                },
                accessor => accessor,
            };
            target.define_property(key, desc);
        }
    }

    fn copy_map(&mut self, ptr: usize, value: &Value, map: &Arc<JsMap>) -> Value {
        let new_map = Arc::new(JsMap::new(map.object.prototype().cloned()));
        self.register(ptr, value, Value::map(new_map.clone()));
        self.stats.copied += 1;
        tracing::trace!(size = map.size(), "copying Map");

        // Keys keep their identity; only stored values are copied
        for (key, value) in map.data().entries() {
            let value = self.internal_clone(&value);
            new_map.data().set(key, value);
        }
        self.clone_members(&map.object, &new_map.object);
        Value::map(new_map)
    }

    fn copy_set(&mut self, ptr: usize, value: &Value, set: &Arc<JsSet>) -> Value {
        let new_set = Arc::new(JsSet::new(set.object.prototype().cloned()));
        self.register(ptr, value, Value::set(new_set.clone()));
        self.stats.copied += 1;
        tracing::trace!(size = set.size(), "copying Set");

        for value in set.data().values() {
            let value = self.internal_clone(&value);
            new_set.data().add(value);
        }
        self.clone_members(&set.object, &new_set.object);
        Value::set(new_set)
    }

    fn copy_array_buffer(&mut self, ptr: usize, value: &Value, ab: &Arc<JsArrayBuffer>) -> Value {
        let new_ab = Arc::new(JsArrayBuffer::from_bytes(
            ab.to_vec(),
            ab.object.prototype().cloned(),
        ));
        if ab.is_detached() {
            new_ab.detach();
        }
        self.register(ptr, value, Value::array_buffer(new_ab.clone()));
        self.stats.copied += 1;
        tracing::trace!(byte_length = ab.byte_length(), "copying ArrayBuffer");

        self.clone_members(&ab.object, &new_ab.object);
        Value::array_buffer(new_ab)
    }

    /// The copy gets a fresh buffer holding only the bytes the view covers,
    /// with the view at offset 0.
    fn copy_typed_array(&mut self, ptr: usize, value: &Value, ta: &Arc<JsTypedArray>) -> Value {
        let buffer = Arc::new(JsArrayBuffer::from_bytes(ta.to_bytes(), None));
        let new_ta = match JsTypedArray::new(
            buffer,
            ta.kind(),
            0,
            ta.length(),
            ta.object.prototype().cloned(),
        ) {
            Ok(new_ta) => Arc::new(new_ta),
            Err(err) => {
                tracing::warn!(kind = ta.kind().name(), %err, "typed array not copied, sharing it");
                return self.share(ptr, value);
            }
        };
        self.register(ptr, value, Value::typed_array(new_ta.clone()));
        self.stats.copied += 1;
        tracing::trace!(kind = ta.kind().name(), length = ta.length(), "copying TypedArray");

        self.clone_members(&ta.object, &new_ta.object);
        Value::typed_array(new_ta)
    }

    fn copy_data_view(&mut self, ptr: usize, value: &Value, dv: &Arc<JsDataView>) -> Value {
        let bytes = dv.to_bytes();
        let byte_length = bytes.len();
        let buffer = Arc::new(JsArrayBuffer::from_bytes(bytes, None));
        let new_dv = match JsDataView::new(
            buffer,
            0,
            Some(byte_length),
            dv.object.prototype().cloned(),
        ) {
            Ok(new_dv) => Arc::new(new_dv),
            Err(err) => {
                tracing::warn!(%err, "DataView not copied, sharing it");
                return self.share(ptr, value);
            }
        };
        self.register(ptr, value, Value::data_view(new_dv.clone()));
        self.stats.copied += 1;
        tracing::trace!(byte_length, "copying DataView");

        self.clone_members(&dv.object, &new_dv.object);
        Value::data_view(new_dv)
    }

    fn copy_date(&mut self, ptr: usize, value: &Value, date: &Arc<JsDate>) -> Value {
        let new_date = Arc::new(JsDate::new(
            date.time_value(),
            date.object.prototype().cloned(),
        ));
        self.register(ptr, value, Value::date(new_date.clone()));
        self.stats.copied += 1;

        self.clone_members(&date.object, &new_date.object);
        Value::date(new_date)
    }

    fn copy_regexp(&mut self, ptr: usize, value: &Value, re: &Arc<JsRegExp>) -> Value {
        let new_re = Arc::new(re.duplicate(re.object.prototype().cloned()));
        self.register(ptr, value, Value::regexp(new_re.clone()));
        self.stats.copied += 1;
        tracing::trace!(regexp = %re, "copying RegExp");

        // carries lastIndex over the fresh instance's 0
        self.clone_members(&re.object, &new_re.object);
        Value::regexp(new_re)
    }
}

/// Deep clone `value`. With `deep_copy`, Map, Set, buffers, typed arrays,
/// DataView, Date and RegExp are duplicated too.
pub fn deep_clone(value: &Value, deep_copy: bool) -> Value {
    deep_clone_with(value, &CloneOptions::default().with_mode(deep_copy.into()))
}

/// Deep clone `value` with explicit options
pub fn deep_clone_with(value: &Value, options: &CloneOptions) -> Value {
    DeepCloner::new(options).clone(value)
}
