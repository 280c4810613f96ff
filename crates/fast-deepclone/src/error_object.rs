//! Error instances

use std::sync::Arc;

use crate::object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::value::Value;

/// Native error constructor an instance was created by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `Error`
    Error,
    /// `TypeError`
    TypeError,
    /// `RangeError`
    RangeError,
    /// `ReferenceError`
    ReferenceError,
    /// `SyntaxError`
    SyntaxError,
    /// `URIError`
    UriError,
    /// `EvalError`
    EvalError,
}

impl ErrorKind {
    /// Constructor name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::TypeError => "TypeError",
            Self::RangeError => "RangeError",
            Self::ReferenceError => "ReferenceError",
            Self::SyntaxError => "SyntaxError",
            Self::UriError => "URIError",
            Self::EvalError => "EvalError",
        }
    }
}

/// A JavaScript error object
#[derive(Debug)]
pub struct JsError {
    /// Own properties (`message`, `stack`) and prototype
    pub object: Arc<JsObject>,
    kind: ErrorKind,
}

impl JsError {
    /// Create an error with a message
    pub fn new(kind: ErrorKind, message: &str, prototype: Option<Arc<JsObject>>) -> Self {
        let object = Arc::new(JsObject::new(prototype));
        object.define_property(
            PropertyKey::string("message"),
            PropertyDescriptor::data_with_attrs(Value::string(message), PropertyAttributes::hidden()),
        );
        Self { object, kind }
    }

    /// Error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The `message` property, if it is still a string
    pub fn message(&self) -> Option<String> {
        self.object
            .get(&PropertyKey::string("message"))
            .and_then(|v| v.as_string().map(|s| s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let err = JsError::new(ErrorKind::RangeError, "out of range", None);
        assert_eq!(err.kind().name(), "RangeError");
        assert_eq!(err.message().as_deref(), Some("out of range"));
        assert!(err.object.own_keys().len() == 1);
    }
}
