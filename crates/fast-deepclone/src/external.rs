//! Host objects
//!
//! Anything the value model has no dedicated kind for (promises, proxies,
//! native handles) is carried as an external object: an opaque payload plus a
//! base object for properties.

use std::any::Any;
use std::sync::Arc;

use crate::object::JsObject;

/// An opaque host-provided object
pub struct JsExternal {
    /// Own properties and prototype
    pub object: Arc<JsObject>,
    type_name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl JsExternal {
    /// Wrap `payload` under a display name such as `"Promise"`
    pub fn new<T: Any + Send + Sync>(
        type_name: &'static str,
        payload: T,
        prototype: Option<Arc<JsObject>>,
    ) -> Self {
        Self {
            object: Arc::new(JsObject::new(prototype)),
            type_name,
            payload: Arc::new(payload),
        }
    }

    /// Display name given at creation
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for JsExternal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JsExternal({})", self.type_name)
    }
}
