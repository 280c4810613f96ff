//! JSON bridge
//!
//! Builds value graphs from `serde_json` documents and serializes them back
//! with `JSON.stringify` rules: undefined, functions and symbols are dropped
//! from objects and become `null` in arrays, dates become ISO strings, and a
//! cycle is a `TypeError`.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::error::{ValueError, ValueResult};
use crate::object::{JsObject, PropertyDescriptor, PropertyKey};
use crate::value::{HeapRef, Value};

/// Convert a JSON document to a value graph
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::null(),
        serde_json::Value::Bool(b) => Value::boolean(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                    Value::int32(i as i32)
                } else {
                    Value::number(i as f64)
                }
            } else if let Some(f) = n.as_f64() {
                Value::number(f)
            } else {
                Value::number(0.0)
            }
        }
        serde_json::Value::String(s) => Value::string(s.as_str()),
        serde_json::Value::Array(arr) => {
            Value::array(Arc::new(JsObject::array_from(arr.iter().map(from_json))))
        }
        serde_json::Value::Object(obj) => {
            let js_obj = JsObject::new(None);
            for (key, val) in obj {
                js_obj.set(PropertyKey::string(key), from_json(val));
            }
            Value::object(Arc::new(js_obj))
        }
    }
}

/// Serialize a value graph to JSON
///
/// Returns `None` when the root itself is not serializable (undefined,
/// functions, symbols).
pub fn to_json(value: &Value) -> ValueResult<Option<serde_json::Value>> {
    let mut stack = FxHashSet::default();
    serialize(value, &mut stack)
}

fn serialize(value: &Value, stack: &mut FxHashSet<usize>) -> ValueResult<Option<serde_json::Value>> {
    let heap = match value {
        Value::Undefined => return Ok(None),
        Value::Null => return Ok(Some(serde_json::Value::Null)),
        Value::Boolean(b) => return Ok(Some(serde_json::Value::Bool(*b))),
        Value::Number(n) => return Ok(Some(number_to_json(*n))),
        Value::String(s) => return Ok(Some(serde_json::Value::String(s.as_str().to_string()))),
        Value::BigInt(_) => {
            return Err(ValueError::type_error("Do not know how to serialize a BigInt"));
        }
        Value::Heap(heap) => heap,
    };

    let (object, is_array) = match heap {
        HeapRef::Function(_) | HeapRef::Symbol(_) => return Ok(None),
        HeapRef::Date(date) => {
            return Ok(Some(
                date.to_iso_string()
                    .map(serde_json::Value::String)
                    .unwrap_or(serde_json::Value::Null),
            ));
        }
        HeapRef::Boxed(boxed) => return serialize(boxed.value_of(), stack),
        HeapRef::Array(arr) => (arr, true),
        other => match other.base_object() {
            Some(object) => (object, false),
            None => return Ok(None),
        },
    };

    let ptr = heap.identity();
    if !stack.insert(ptr) {
        return Err(ValueError::type_error("Converting circular structure to JSON"));
    }

    let json = if is_array {
        let mut items = Vec::with_capacity(object.array_length());
        for i in 0..object.array_length() {
            let element = object
                .get(&PropertyKey::Index(i as u32))
                .unwrap_or(Value::Undefined);
            items.push(serialize(&element, stack)?.unwrap_or(serde_json::Value::Null));
        }
        serde_json::Value::Array(items)
    } else {
        let mut map = serde_json::Map::new();
        for (key, desc) in object.own_properties() {
            if key.is_symbol() {
                continue;
            }
            if let PropertyDescriptor::Data { value, attributes } = desc
                && attributes.enumerable
                && let Some(json) = serialize(&value, stack)?
            {
                map.insert(key.to_string(), json);
            }
        }
        serde_json::Value::Object(map)
    };

    stack.remove(&ptr);
    Ok(Some(json))
}

fn number_to_json(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() < (i64::MAX as f64) {
        return serde_json::Value::Number(serde_json::Number::from(n as i64));
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
