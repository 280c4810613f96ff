//! Wrapper objects for primitives (`new Number(1)`, `Object(Symbol())`, ...)

use std::sync::Arc;

use crate::error::{ValueError, ValueResult};
use crate::object::JsObject;
use crate::value::{HeapRef, Value};

/// A primitive boxed into an object
#[derive(Debug)]
pub struct JsBoxedPrimitive {
    /// Own properties and prototype
    pub object: Arc<JsObject>,
    primitive: Value,
}

impl JsBoxedPrimitive {
    /// Box `primitive`. Fails for undefined, null and objects.
    pub fn new(primitive: Value, prototype: Option<Arc<JsObject>>) -> ValueResult<Self> {
        match &primitive {
            Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::BigInt(_)
            | Value::Heap(HeapRef::Symbol(_)) => Ok(Self {
                object: Arc::new(JsObject::new(prototype)),
                primitive,
            }),
            other => Err(ValueError::type_error(format!(
                "cannot box {}",
                other.type_of()
            ))),
        }
    }

    /// `valueOf()`
    pub fn value_of(&self) -> &Value {
        &self.primitive
    }

    /// Wrapper class name (`Number`, `String`, ...)
    pub fn class_name(&self) -> &'static str {
        match &self.primitive {
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::BigInt(_) => "BigInt",
            _ => "Symbol",
        }
    }
}
