//! Callable objects
//!
//! Functions are backed by Rust closures. Script function bodies are outside
//! the value model; a function created without a body returns `undefined`.

use std::sync::Arc;

use crate::object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::string::JsString;
use crate::value::Value;

/// Native function handler: `(this, args) -> result`
pub type NativeFn = Arc<dyn Fn(&Value, &[Value]) -> Value + Send + Sync>;

/// Syntactic flavour of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionKind {
    /// `function f() {}`
    #[default]
    Normal,
    /// `() => {}`
    Arrow,
    /// `function* g() {}`
    Generator,
    /// `async function f() {}`
    Async,
    /// `async function* g() {}`
    AsyncGenerator,
}

/// A JavaScript function object
pub struct JsFunction {
    /// Own properties (`name`, `length`, user-attached fields) and prototype
    pub object: Arc<JsObject>,
    name: JsString,
    kind: FunctionKind,
    body: Option<NativeFn>,
}

impl JsFunction {
    /// Create a function backed by `body`
    pub fn native(
        name: &str,
        body: impl Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::build(name, FunctionKind::Normal, Some(Arc::new(body)))
    }

    /// Create a function of the given kind without a body
    pub fn without_body(name: &str, kind: FunctionKind) -> Self {
        Self::build(name, kind, None)
    }

    fn build(name: &str, kind: FunctionKind, body: Option<NativeFn>) -> Self {
        let object = Arc::new(JsObject::new(None));
        object.define_property(
            PropertyKey::string("name"),
            PropertyDescriptor::data_with_attrs(
                Value::string(name),
                PropertyAttributes {
                    writable: false,
                    enumerable: false,
                    configurable: true,
                },
            ),
        );
        Self {
            object,
            name: JsString::new(name),
            kind,
            body,
        }
    }

    /// Function name
    pub fn name(&self) -> &JsString {
        &self.name
    }

    /// Function kind
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Invoke with a receiver and arguments
    pub fn call(&self, this: &Value, args: &[Value]) -> Value {
        match &self.body {
            Some(body) => body(this, args),
            None => Value::undefined(),
        }
    }
}

impl std::fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsFunction")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("native", &self.body.is_some())
            .finish()
    }
}
