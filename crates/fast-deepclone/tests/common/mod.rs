//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use fast_deepclone::map_data::{JsMap, JsSet};
use fast_deepclone::object::{JsObject, PropertyDescriptor, PropertyKey};
use fast_deepclone::value::{HeapRef, Value};
use rustc_hash::FxHashSet;
use tracing_subscriber::filter::EnvFilter;

/// Route clone logs to the test output; filter with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Create an ordinary object from `(key, value)` pairs
pub fn obj(props: &[(&str, Value)]) -> Arc<JsObject> {
    obj_with_proto(None, props)
}

/// Create an ordinary object with a prototype
pub fn obj_with_proto(proto: Option<Arc<JsObject>>, props: &[(&str, Value)]) -> Arc<JsObject> {
    let object = Arc::new(JsObject::new(proto));
    for (key, value) in props {
        object.set(PropertyKey::string(key), value.clone());
    }
    object
}

/// Create an array
pub fn arr(values: impl IntoIterator<Item = Value>) -> Arc<JsObject> {
    Arc::new(JsObject::array_from(values))
}

/// Read a property, panicking when it is missing
pub fn prop(value: &Value, key: &str) -> Value {
    let heap = value.heap_ref().expect("not a heap value");
    let object = heap.base_object().expect("no base object");
    object
        .get(&PropertyKey::string(key))
        .unwrap_or_else(|| panic!("missing property {key}"))
}

/// `{foo:'bar', bar:{baz:{qux:'qux'}}, qux:[1,'foo',3.14,{bar:'baz'}]}`
pub fn sample_pojo() -> Value {
    fast_deepclone::from_json(&serde_json::json!({
        "foo": "bar",
        "bar": {"baz": {"qux": "qux"}},
        "qux": [1, "foo", 3.14, {"bar": "baz"}],
    }))
}

/// Structural equality that follows cycles.
///
/// Ordinary objects and arrays compare by prototype identity and enumerable
/// members; Map, Set, buffers, Date and RegExp compare by contents; every
/// other heap kind compares by identity.
pub fn deep_equals(a: &Value, b: &Value) -> bool {
    let mut assumed = FxHashSet::default();
    equals(a, b, &mut assumed)
}

fn equals(a: &Value, b: &Value, assumed: &mut FxHashSet<(usize, usize)>) -> bool {
    let (ha, hb) = match (a.heap_ref(), b.heap_ref()) {
        (Some(ha), Some(hb)) => (ha, hb),
        (None, None) => return a.same_value_zero(b),
        _ => return false,
    };
    if ha.ptr_eq(hb) || !assumed.insert((ha.identity(), hb.identity())) {
        return true;
    }

    match (ha, hb) {
        (HeapRef::Object(oa), HeapRef::Object(ob)) => members_equal(oa, ob, assumed),
        (HeapRef::Array(oa), HeapRef::Array(ob)) => {
            oa.array_length() == ob.array_length() && members_equal(oa, ob, assumed)
        }
        (HeapRef::Map(ma), HeapRef::Map(mb)) => {
            let (ea, eb) = (ma.data().entries(), mb.data().entries());
            ea.len() == eb.len()
                && ea.iter().zip(&eb).all(|((ka, va), (kb, vb))| {
                    ka.same_value_zero(kb) && equals(va, vb, assumed)
                })
        }
        (HeapRef::Set(sa), HeapRef::Set(sb)) => {
            let (va, vb) = (sa.data().values(), sb.data().values());
            va.len() == vb.len() && va.iter().zip(&vb).all(|(x, y)| equals(x, y, assumed))
        }
        (HeapRef::ArrayBuffer(x), HeapRef::ArrayBuffer(y)) => x.to_vec() == y.to_vec(),
        (HeapRef::TypedArray(x), HeapRef::TypedArray(y)) => {
            x.kind() == y.kind() && x.to_bytes() == y.to_bytes()
        }
        (HeapRef::DataView(x), HeapRef::DataView(y)) => x.to_bytes() == y.to_bytes(),
        (HeapRef::Date(x), HeapRef::Date(y)) => {
            Value::number(x.time_value()).same_value_zero(&Value::number(y.time_value()))
        }
        (HeapRef::RegExp(x), HeapRef::RegExp(y)) => {
            x.source() == y.source() && x.flags() == y.flags()
        }
        _ => false,
    }
}

fn members_equal(a: &JsObject, b: &JsObject, assumed: &mut FxHashSet<(usize, usize)>) -> bool {
    let same_proto = match (a.prototype(), b.prototype()) {
        (Some(pa), Some(pb)) => Arc::ptr_eq(pa, pb),
        (None, None) => true,
        _ => false,
    };
    if !same_proto {
        return false;
    }

    let enumerable = |object: &JsObject| -> Vec<(PropertyKey, Value)> {
        object
            .own_properties()
            .into_iter()
            .filter_map(|(key, desc)| match desc {
                PropertyDescriptor::Data { value, attributes } if attributes.enumerable => {
                    Some((key, value))
                }
                _ => None,
            })
            .collect()
    };
    let (pa, pb) = (enumerable(a), enumerable(b));
    pa.len() == pb.len()
        && pa
            .iter()
            .zip(&pb)
            .all(|((ka, va), (kb, vb))| ka == kb && equals(va, vb, assumed))
}

/// A Map with a few string entries
pub fn sample_map(proto: Option<Arc<JsObject>>) -> Arc<JsMap> {
    Arc::new(JsMap::from_entries(
        [
            (Value::string("foo"), Value::string("bar")),
            (Value::string("bar"), Value::string("baz")),
            (Value::string("baz"), Value::string("qux")),
        ],
        proto,
    ))
}

/// A Set with a few strings
pub fn sample_set(proto: Option<Arc<JsObject>>) -> Arc<JsSet> {
    Arc::new(JsSet::from_values(
        [Value::string("foo"), Value::string("bar"), Value::string("baz")],
        proto,
    ))
}
