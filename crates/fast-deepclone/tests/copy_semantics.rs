//! Copy mode: special built-ins are duplicated as well, keeping their
//! prototype and own properties.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use common::{arr, deep_equals, init_tracing, obj, obj_with_proto, prop, sample_map, sample_set};
use fast_deepclone::array_buffer::JsArrayBuffer;
use fast_deepclone::boxed::JsBoxedPrimitive;
use fast_deepclone::data_view::JsDataView;
use fast_deepclone::date::JsDate;
use fast_deepclone::function::JsFunction;
use fast_deepclone::map_data::{JsMap, JsSet};
use fast_deepclone::object::{JsObject, PropertyKey};
use fast_deepclone::regexp::JsRegExp;
use fast_deepclone::typed_array::{JsTypedArray, TypedArrayKind};
use fast_deepclone::weak_collection::{JsWeakMap, JsWeakSet};
use fast_deepclone::{CloneOptions, DeepCloner, Value, deep_clone};
use num_bigint::BigInt;

/// A prototype standing in for a user subclass: `get` is overridden and
/// flips `called` when invoked
fn subclass_proto(called: Arc<AtomicBool>) -> Arc<JsObject> {
    let get = JsFunction::native("get", move |_, _| {
        called.store(true, Ordering::SeqCst);
        Value::undefined()
    });
    obj(&[("get", Value::function(Arc::new(get)))])
}

fn call_method(target: &Value, name: &str) -> Value {
    let method = prop(target, name);
    method.as_function().unwrap().call(target, &[])
}

// ============================================================================
// Map and Set
// ============================================================================

#[test]
fn test_map_is_copied_with_ordered_entries() {
    let source = Value::map(sample_map(None));
    let copied = deep_clone(&source, true);

    assert_ne!(copied, source);
    assert!(deep_equals(&source, &copied));
    let entries = copied.as_map().unwrap().data().entries();
    let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_string().unwrap().to_string()).collect();
    assert_eq!(keys, ["foo", "bar", "baz"]);
}

#[test]
fn test_map_values_are_copied_and_keys_kept() {
    let key = Value::object(obj(&[("k", Value::int32(1))]));
    let inner = Value::object(obj(&[("v", Value::int32(2))]));
    let source = Arc::new(JsMap::from_entries([(key.clone(), inner.clone())], None));

    let copied = deep_clone(&Value::map(source), true);
    let data = copied.as_map().unwrap().data();

    let copied_inner = data.get(&key).expect("key kept by identity");
    assert_ne!(copied_inner, inner);
    assert!(deep_equals(&copied_inner, &inner));
}

#[test]
fn test_map_subclass_keeps_behavior_and_extra_property() {
    let called = Arc::new(AtomicBool::new(false));
    let proto = subclass_proto(called.clone());
    let source = sample_map(Some(proto.clone()));
    let extra = Value::object(obj(&[("x", Value::int32(1))]));
    source.object.set("bar".into(), extra.clone());

    let copied = deep_clone(&Value::map(source.clone()), true);
    let copied_map = copied.as_map().unwrap();

    assert!(!Arc::ptr_eq(copied_map, &source));
    assert!(Arc::ptr_eq(copied_map.object.prototype().unwrap(), &proto));
    assert_eq!(copied_map.size(), 3);

    call_method(&copied, "get");
    assert!(called.load(Ordering::SeqCst));
    let copied_extra = prop(&copied, "bar");
    assert_ne!(copied_extra, extra);
    assert!(deep_equals(&copied_extra, &extra));
}

#[test]
fn test_set_is_copied() {
    let source = Value::set(sample_set(None));
    let copied = deep_clone(&source, true);

    assert_ne!(copied, source);
    assert_eq!(copied.as_set().unwrap().size(), 3);
    assert!(deep_equals(&source, &copied));
}

#[test]
fn test_set_subclass_keeps_behavior_and_extra_property() {
    let called = Arc::new(AtomicBool::new(false));
    let source = sample_set(Some(subclass_proto(called.clone())));
    source.object.set("bar".into(), Value::string("baz"));

    let copied = deep_clone(&Value::set(source), true);

    call_method(&copied, "get");
    assert!(called.load(Ordering::SeqCst));
    assert_eq!(prop(&copied, "bar"), Value::string("baz"));
}

#[test]
fn test_set_members_are_copied() {
    let member = Value::object(obj(&[("a", Value::int32(1))]));
    let source = Arc::new(JsSet::from_values([member.clone(), Value::int32(7)], None));

    let copied = deep_clone(&Value::set(source), true);
    let values = copied.as_set().unwrap().data().values();

    assert_eq!(values.len(), 2);
    assert_ne!(values[0], member);
    assert!(deep_equals(&values[0], &member));
    assert_eq!(values[1], Value::int32(7));
}

#[test]
fn test_map_containing_itself() {
    let source = Arc::new(JsMap::new(None));
    let source_val = Value::map(source.clone());
    source.data().set(Value::string("self"), source_val.clone());

    let copied = deep_clone(&source_val, true);
    let back = copied.as_map().unwrap().data().get(&Value::string("self")).unwrap();
    assert_eq!(back, copied);
    assert_ne!(back, source_val);
}

#[test]
fn test_shared_map_copied_once() {
    init_tracing();
    let map = Value::map(sample_map(None));
    let holder = Value::object(obj(&[("a", map.clone()), ("b", map.clone())]));

    let mut cloner = DeepCloner::new(&CloneOptions::copy_mode());
    let copied = cloner.clone(&holder);

    assert_eq!(prop(&copied, "a"), prop(&copied, "b"));
    assert_ne!(prop(&copied, "a"), map);
    assert_eq!(cloner.stats().copied, 1);
    assert_eq!(cloner.stats().identity_hits, 1);
}

// ============================================================================
// Buffers
// ============================================================================

#[test]
fn test_buffer_prototype_survives_copy() {
    let buffer_proto = obj(&[("toString", Value::function(Arc::new(JsFunction::native(
        "toString",
        |_, _| Value::string("foobar"),
    ))))]);
    let bytes = b"foobar".iter().map(|b| *b as f64).collect::<Vec<_>>();
    let source = Arc::new(JsTypedArray::from_values(
        TypedArrayKind::Uint8,
        &bytes,
        Some(buffer_proto.clone()),
    ));

    let copied = deep_clone(&Value::typed_array(source.clone()), true);
    let copied_ta = copied.as_typed_array().unwrap();

    assert!(!Arc::ptr_eq(copied_ta, &source));
    assert!(Arc::ptr_eq(copied_ta.object.prototype().unwrap(), &buffer_proto));
    assert_eq!(copied_ta.to_bytes(), b"foobar");
    assert_eq!(call_method(&copied, "toString"), Value::string("foobar"));
}

#[test]
fn test_every_typed_array_kind_is_copied() {
    for kind in TypedArrayKind::ALL {
        let source = Arc::new(JsTypedArray::from_values(kind, &[1.0, 2.0, 3.0], None));
        let copied = deep_clone(&Value::typed_array(source.clone()), true);
        let copied_ta = copied.as_typed_array().unwrap();

        assert!(!Arc::ptr_eq(copied_ta, &source), "{}", kind.name());
        assert_eq!(copied_ta.kind(), kind);
        assert_eq!(copied_ta.length(), 3);
        assert_eq!(copied_ta.to_bytes(), source.to_bytes(), "{}", kind.name());
        assert!(!Arc::ptr_eq(copied_ta.buffer(), source.buffer()));

        // storage is independent
        copied_ta.set(0, 9.0);
        assert_eq!(source.get(0), Some(1.0));
    }
}

#[test]
fn test_bigint_elements_survive_copy() {
    let source = Arc::new(JsTypedArray::with_length(TypedArrayKind::BigInt64, 2, None));
    let big = BigInt::from(i64::MAX) - 1;
    source.set_bigint(0, &big);
    source.set_bigint(1, &BigInt::from(-42));

    let copied = deep_clone(&Value::typed_array(source), true);
    let copied_ta = copied.as_typed_array().unwrap();
    assert_eq!(copied_ta.get_bigint(0), Some(big));
    assert_eq!(copied_ta.get_bigint(1), Some(BigInt::from(-42)));
}

#[test]
fn test_typed_array_with_offset_gets_compact_buffer() {
    let backing = Arc::new(JsArrayBuffer::from_bytes((0u8..16).collect(), None));
    let source = Arc::new(
        JsTypedArray::new(backing, TypedArrayKind::Uint16, 4, 3, None).unwrap(),
    );

    let copied = deep_clone(&Value::typed_array(source.clone()), true);
    let copied_ta = copied.as_typed_array().unwrap();

    assert_eq!(copied_ta.byte_offset(), 0);
    assert_eq!(copied_ta.buffer().byte_length(), 6);
    assert_eq!(copied_ta.to_bytes(), vec![4, 5, 6, 7, 8, 9]);
    assert_eq!(copied_ta.get(1), source.get(1));
}

#[test]
fn test_array_buffer_and_data_view_are_copied() {
    let ab = Arc::new(JsArrayBuffer::from_bytes(vec![1, 2, 3, 4, 5, 6, 7, 8], None));
    let dv = Arc::new(JsDataView::new(ab.clone(), 2, Some(4), None).unwrap());

    let copied_ab = deep_clone(&Value::array_buffer(ab.clone()), true);
    let copied_ab = copied_ab.as_array_buffer().unwrap();
    assert!(!Arc::ptr_eq(copied_ab, &ab));
    assert_eq!(copied_ab.to_vec(), ab.to_vec());
    copied_ab.write(0, &[42]);
    assert_eq!(ab.to_vec()[0], 1);

    let copied_dv = deep_clone(&Value::data_view(dv.clone()), true);
    let copied_dv = copied_dv.as_data_view().unwrap();
    assert!(!Arc::ptr_eq(copied_dv, &dv));
    assert_eq!(copied_dv.byte_offset(), 0);
    assert_eq!(copied_dv.byte_length(), 4);
    assert_eq!(copied_dv.get_uint8(0).unwrap(), 3);
    copied_dv.set_uint8(0, 99).unwrap();
    assert_eq!(dv.get_uint8(0).unwrap(), 3);
}

#[test]
fn test_detached_array_buffer_copies_detached() {
    let ab = Arc::new(JsArrayBuffer::new(8, None));
    ab.detach();

    let copied = deep_clone(&Value::array_buffer(ab.clone()), true);
    let copied = copied.as_array_buffer().unwrap();
    assert!(!Arc::ptr_eq(copied, &ab));
    assert!(copied.is_detached());
}

// ============================================================================
// Date and RegExp
// ============================================================================

#[test]
fn test_date_is_copied() {
    let source = Arc::new(JsDate::new(1_700_000_000_123.0, None));
    source.object.set("label".into(), Value::string("release"));

    let copied = deep_clone(&Value::date(source.clone()), true);
    let copied_date = copied.as_date().unwrap();

    assert!(!Arc::ptr_eq(copied_date, &source));
    assert_eq!(copied_date.time_value(), source.time_value());
    assert_eq!(prop(&copied, "label"), Value::string("release"));

    copied_date.set_time(0.0);
    assert_eq!(source.time_value(), 1_700_000_000_123.0);
}

#[test]
fn test_invalid_date_stays_invalid() {
    let source = Value::date(Arc::new(JsDate::new(f64::NAN, None)));
    let copied = deep_clone(&source, true);
    assert_ne!(copied, source);
    assert!(!copied.as_date().unwrap().is_valid());
}

#[test]
fn test_regexp_is_copied() {
    let source = Arc::new(JsRegExp::new("fo+", "gi", None));
    source.object.set("lastIndex".into(), Value::int32(2));

    let copied = deep_clone(&Value::regexp(source.clone()), true);
    let copied_re = copied.as_regexp().unwrap();

    assert!(!Arc::ptr_eq(copied_re, &source));
    assert_eq!(copied_re.source(), "fo+");
    assert_eq!(copied_re.flags(), "gi");
    assert_eq!(copied_re.is_match("FOO"), Some(true));
    assert_eq!(prop(&copied, "lastIndex"), Value::int32(2));
}

// ============================================================================
// Mixed graphs and pass-through kinds
// ============================================================================

#[test]
fn test_special_kinds_inside_composites_are_copied() {
    let date = Value::date(Arc::new(JsDate::new(0.0, None)));
    let list = Value::array(arr([date.clone(), Value::set(sample_set(None))]));
    let source = Value::object(obj(&[("when", date.clone()), ("list", list)]));

    let copied = deep_clone(&source, true);
    let copied_date = prop(&copied, "when");

    assert_ne!(copied_date, date);
    assert!(deep_equals(&source, &copied));
    // one copy per source node
    let listed = prop(&copied, "list").as_array().unwrap().get(&PropertyKey::Index(0));
    assert_eq!(listed, Some(copied_date));
}

#[test]
fn test_weak_and_opaque_kinds_pass_through_copy_mode() {
    let weak_map = Value::weak_map(Arc::new(JsWeakMap::new(None)));
    let weak_set = Value::weak_set(Arc::new(JsWeakSet::new(None)));
    let boxed = Value::boxed(Arc::new(JsBoxedPrimitive::new(Value::string("s"), None).unwrap()));
    let source = Value::object(obj(&[
        ("wm", weak_map.clone()),
        ("ws", weak_set.clone()),
        ("boxed", boxed.clone()),
    ]));

    let copied = deep_clone(&source, true);
    assert_ne!(copied, source);
    assert_eq!(prop(&copied, "wm"), weak_map);
    assert_eq!(prop(&copied, "ws"), weak_set);
    assert_eq!(prop(&copied, "boxed"), boxed);
}

#[test]
fn test_class_instance_in_copy_mode_keeps_prototype() {
    let proto = obj(&[]);
    let instance = Value::object(obj_with_proto(
        Some(proto.clone()),
        &[("when", Value::date(Arc::new(JsDate::new(5.0, None))))],
    ));

    let copied = deep_clone(&instance, true);
    assert!(Arc::ptr_eq(copied.as_object().unwrap().prototype().unwrap(), &proto));
    assert_ne!(prop(&copied, "when"), prop(&instance, "when"));
}
