//! Native entry point
//!
//! Exposes the clone engine as a callable `deepClone(value, deepCopy)` with
//! the loose argument handling scripts expect.

use std::sync::Arc;

use crate::deep_clone::deep_clone;
use crate::function::JsFunction;
use crate::object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::value::Value;

/// Property name under which [`install`] exposes the function
pub const EXPORT_NAME: &str = "deepClone";

/// `deepClone(value, deepCopy)`
///
/// Without arguments returns a fresh empty object. The second argument turns
/// on copy mode only when it is a boolean `true`; anything else means clone
/// mode.
pub fn deep_clone_native(_this: &Value, args: &[Value]) -> Value {
    let Some(value) = args.first() else {
        return Value::object(Arc::new(JsObject::new(None)));
    };
    let deep_copy = args.get(1).and_then(Value::as_boolean).unwrap_or(false);
    deep_clone(value, deep_copy)
}

/// Define `deepClone` on `target`
pub fn install(target: &JsObject) {
    let function = JsFunction::native(EXPORT_NAME, deep_clone_native);
    tracing::debug!(name = EXPORT_NAME, "installing native clone function");
    target.define_property(
        PropertyKey::string(EXPORT_NAME),
        PropertyDescriptor::data_with_attrs(
            Value::function(Arc::new(function)),
            PropertyAttributes {
                writable: true,
                enumerable: true,
                configurable: true,
            },
        ),
    );
}
