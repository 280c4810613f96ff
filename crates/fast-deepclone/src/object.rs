//! JavaScript objects
//!
//! Ordinary objects keep named properties in insertion order and arrays keep
//! their elements in a separate vector where `None` marks a hole. Own keys are
//! reported in the ECMAScript order: integer indices ascending, then string
//! keys in insertion order, then symbol keys in insertion order.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::string::JsString;
use crate::symbol::Symbol;
use crate::value::Value;

/// Property key (string, symbol or array index)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String property key
    String(JsString),
    /// Symbol property key
    Symbol(Arc<Symbol>),
    /// Integer index
    Index(u32),
}

impl PropertyKey {
    /// Create a string property key. Canonical numeric strings become indices.
    pub fn string(s: &str) -> Self {
        match canonical_index(s) {
            Some(i) => Self::Index(i),
            None => Self::String(JsString::new(s)),
        }
    }

    /// Create an index property key
    pub fn index(i: u32) -> Self {
        Self::Index(i)
    }

    /// Create a symbol property key
    pub fn symbol(s: Arc<Symbol>) -> Self {
        Self::Symbol(s)
    }

    /// Check if this key is a symbol
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Get the index, if this is an index key
    pub fn as_index(&self) -> Option<u32> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }
}

fn canonical_index(s: &str) -> Option<u32> {
    let i: u32 = s.parse().ok()?;
    (i != u32::MAX && i.to_string() == s).then_some(i)
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        Self::Index(i)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Index(i) => write!(f, "{i}"),
            Self::Symbol(s) => match s.description() {
                Some(desc) => write!(f, "Symbol({desc})"),
                None => f.write_str("Symbol()"),
            },
        }
    }
}

/// Property attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Property is writable
    pub writable: bool,
    /// Property is enumerable
    pub enumerable: bool,
    /// Property is configurable
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Default data property attributes
    pub const fn data() -> Self {
        Self {
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Writable and configurable, but skipped by enumeration
    pub const fn hidden() -> Self {
        Self {
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// Non-writable, non-enumerable, non-configurable
    pub const fn frozen() -> Self {
        Self {
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self::data()
    }
}

/// Property descriptor
#[derive(Clone, Debug)]
pub enum PropertyDescriptor {
    /// Data property
    Data {
        /// The value
        value: Value,
        /// Attributes
        attributes: PropertyAttributes,
    },
    /// Accessor property
    Accessor {
        /// Getter function
        get: Option<Value>,
        /// Setter function
        set: Option<Value>,
        /// Attributes (`writable` is ignored)
        attributes: PropertyAttributes,
    },
}

impl PropertyDescriptor {
    /// Create a data property
    pub fn data(value: Value) -> Self {
        Self::Data {
            value,
            attributes: PropertyAttributes::data(),
        }
    }

    /// Create a data property with specific attributes
    pub fn data_with_attrs(value: Value, attributes: PropertyAttributes) -> Self {
        Self::Data { value, attributes }
    }

    /// Get the value (for data properties)
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// Attributes of either variant
    pub fn attributes(&self) -> PropertyAttributes {
        match self {
            Self::Data { attributes, .. } | Self::Accessor { attributes, .. } => *attributes,
        }
    }

    /// Check if writable
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Data { attributes, .. } => attributes.writable,
            Self::Accessor { .. } => false,
        }
    }

    /// Check if enumerable
    pub fn is_enumerable(&self) -> bool {
        self.attributes().enumerable
    }
}

type PropertyMap = IndexMap<PropertyKey, PropertyDescriptor, FxBuildHasher>;

/// A JavaScript object
///
/// Thread-safe with interior mutability. Arrays store their elements
/// separately from named properties.
pub struct JsObject {
    /// Named (and, for non-arrays, indexed) properties in insertion order
    properties: RwLock<PropertyMap>,
    /// Prototype (None for the end of the chain)
    prototype: Option<Arc<JsObject>>,
    /// Array elements; `None` is a hole
    elements: RwLock<Vec<Option<Value>>>,
    is_array: bool,
}

impl JsObject {
    /// Create a new empty object
    pub fn new(prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            properties: RwLock::new(PropertyMap::default()),
            prototype,
            elements: RwLock::new(Vec::new()),
            is_array: false,
        }
    }

    /// Create a new array of `length` holes
    pub fn array(length: usize) -> Self {
        Self::array_with_prototype(length, None)
    }

    /// Create a new array of `length` holes with an explicit prototype
    pub fn array_with_prototype(length: usize, prototype: Option<Arc<JsObject>>) -> Self {
        let mut obj = Self::new(prototype);
        obj.is_array = true;
        obj.elements.get_mut().resize(length, None);
        obj
    }

    /// Create a dense array from values
    pub fn array_from(values: impl IntoIterator<Item = Value>) -> Self {
        let mut obj = Self::array(0);
        obj.elements.get_mut().extend(values.into_iter().map(Some));
        obj
    }

    /// Get property by key, walking the prototype chain.
    /// Accessor properties yield `None`; there is no interpreter to run getters.
    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        if let Some(desc) = self.properties.read().get(key) {
            return desc.value().cloned();
        }

        if self.is_array
            && let PropertyKey::Index(i) = key
            && let Some(Some(value)) = self.elements.read().get(*i as usize)
        {
            return Some(value.clone());
        }

        self.prototype.as_ref().and_then(|proto| proto.get(key))
    }

    /// Get an own property descriptor
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        if self.is_array
            && let PropertyKey::Index(i) = key
        {
            return self
                .elements
                .read()
                .get(*i as usize)
                .cloned()
                .flatten()
                .map(PropertyDescriptor::data);
        }
        self.properties.read().get(key).cloned()
    }

    /// Set property by key. Returns `false` if the property is read-only.
    pub fn set(&self, key: PropertyKey, value: Value) -> bool {
        if self.is_array
            && let PropertyKey::Index(i) = &key
        {
            let mut elements = self.elements.write();
            let idx = *i as usize;
            if idx >= elements.len() {
                elements.resize(idx + 1, None);
            }
            elements[idx] = Some(value);
            return true;
        }

        let mut props = self.properties.write();
        match props.get_mut(&key) {
            Some(PropertyDescriptor::Data {
                value: slot,
                attributes,
            }) => {
                if !attributes.writable {
                    return false;
                }
                *slot = value;
                true
            }
            Some(PropertyDescriptor::Accessor { .. }) => false,
            None => {
                props.insert(key, PropertyDescriptor::data(value));
                true
            }
        }
    }

    /// Define a property with descriptor, replacing any existing one in place
    pub fn define_property(&self, key: PropertyKey, desc: PropertyDescriptor) -> bool {
        if self.is_array
            && let PropertyKey::Index(_) = key
            && let PropertyDescriptor::Data { value, .. } = desc
        {
            return self.set(key, value);
        }

        self.properties.write().insert(key, desc);
        true
    }

    /// Delete an own property. Array elements become holes.
    pub fn delete(&self, key: &PropertyKey) -> bool {
        if self.is_array
            && let PropertyKey::Index(i) = key
        {
            if let Some(slot) = self.elements.write().get_mut(*i as usize) {
                *slot = None;
            }
            return true;
        }

        let mut props = self.properties.write();
        match props.get(key) {
            Some(desc) if !desc.attributes().configurable => false,
            Some(_) => props.shift_remove(key).is_some(),
            None => true,
        }
    }

    /// Check if object has own property
    pub fn has_own(&self, key: &PropertyKey) -> bool {
        if self.is_array
            && let PropertyKey::Index(i) = key
            && matches!(self.elements.read().get(*i as usize), Some(Some(_)))
        {
            return true;
        }
        self.properties.read().contains_key(key)
    }

    /// Check if object has property (including prototype chain)
    pub fn has(&self, key: &PropertyKey) -> bool {
        self.has_own(key) || self.prototype.as_ref().is_some_and(|proto| proto.has(key))
    }

    /// Own property keys in ECMAScript order
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.own_properties().into_iter().map(|(key, _)| key).collect()
    }

    /// Snapshot of own properties in ECMAScript key order.
    ///
    /// Locks are released before returning, so callers may mutate or recurse
    /// into the same object while iterating the snapshot.
    pub fn own_properties(&self) -> Vec<(PropertyKey, PropertyDescriptor)> {
        let mut result = Vec::new();

        for (i, element) in self.elements.read().iter().enumerate() {
            if let Some(value) = element {
                result.push((
                    PropertyKey::Index(i as u32),
                    PropertyDescriptor::data(value.clone()),
                ));
            }
        }

        let props = self.properties.read();
        let mut indexed: Vec<(u32, &PropertyDescriptor)> = props
            .iter()
            .filter_map(|(k, d)| k.as_index().map(|i| (i, d)))
            .collect();
        indexed.sort_unstable_by_key(|(i, _)| *i);
        result.extend(
            indexed
                .into_iter()
                .map(|(i, d)| (PropertyKey::Index(i), d.clone())),
        );
        result.extend(
            props
                .iter()
                .filter(|(k, _)| matches!(k, PropertyKey::String(_)))
                .map(|(k, d)| (k.clone(), d.clone())),
        );
        result.extend(
            props
                .iter()
                .filter(|(k, _)| k.is_symbol())
                .map(|(k, d)| (k.clone(), d.clone())),
        );
        result
    }

    /// Get prototype
    pub fn prototype(&self) -> Option<&Arc<JsObject>> {
        self.prototype.as_ref()
    }

    /// Check if object is an array
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Get array length (for arrays)
    pub fn array_length(&self) -> usize {
        self.elements.read().len()
    }

    /// Truncate or extend (with holes) the array
    pub fn set_array_length(&self, length: usize) {
        self.elements.write().resize(length, None);
    }

    /// Push element to array
    pub fn array_push(&self, value: Value) {
        self.elements.write().push(Some(value));
    }

    /// Number of own named properties (excluding array elements)
    pub fn property_count(&self) -> usize {
        self.properties.read().len()
    }
}

impl fmt::Debug for JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsObject")
            .field("properties", &self.properties.read().len())
            .field("elements", &self.elements.read().len())
            .field("is_array", &self.is_array)
            .field("has_prototype", &self.prototype.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_get_set() {
        let obj = JsObject::new(None);

        obj.set(PropertyKey::string("foo"), Value::int32(42));
        assert_eq!(obj.get(&PropertyKey::string("foo")), Some(Value::int32(42)));
    }

    #[test]
    fn test_prototype_lookup() {
        let proto = Arc::new(JsObject::new(None));
        proto.set("greeting".into(), Value::string("hi"));
        let obj = JsObject::new(Some(proto));

        assert!(obj.has(&"greeting".into()));
        assert!(!obj.has_own(&"greeting".into()));
        assert_eq!(obj.get(&"greeting".into()), Some(Value::string("hi")));
    }

    #[test]
    fn test_own_keys_order() {
        let sym = Symbol::new(Some("s"));
        let obj = JsObject::new(None);
        obj.set("b".into(), Value::int32(1));
        obj.set(PropertyKey::symbol(sym.clone()), Value::int32(2));
        obj.set("10".into(), Value::int32(3));
        obj.set("a".into(), Value::int32(4));
        obj.set("2".into(), Value::int32(5));

        assert_eq!(
            obj.own_keys(),
            vec![
                PropertyKey::Index(2),
                PropertyKey::Index(10),
                PropertyKey::string("b"),
                PropertyKey::string("a"),
                PropertyKey::Symbol(sym),
            ]
        );
    }

    #[test]
    fn test_non_canonical_numeric_strings_stay_strings() {
        assert_eq!(PropertyKey::string("01"), PropertyKey::String(JsString::new("01")));
        assert_eq!(PropertyKey::string("+1"), PropertyKey::String(JsString::new("+1")));
        assert_eq!(PropertyKey::string("7"), PropertyKey::Index(7));
    }

    #[test]
    fn test_array_holes() {
        let arr = JsObject::array(3);
        assert!(arr.is_array());
        assert_eq!(arr.array_length(), 3);
        assert!(arr.own_keys().is_empty());

        arr.set(PropertyKey::Index(1), Value::int32(2));
        arr.set(PropertyKey::Index(5), Value::int32(6));
        assert_eq!(arr.array_length(), 6);
        assert_eq!(arr.own_keys(), vec![PropertyKey::Index(1), PropertyKey::Index(5)]);
        assert!(!arr.has_own(&PropertyKey::Index(0)));

        arr.delete(&PropertyKey::Index(1));
        assert_eq!(arr.array_length(), 6);
        assert_eq!(arr.get(&PropertyKey::Index(1)), None);
    }

    #[test]
    fn test_read_only_property() {
        let obj = JsObject::new(None);
        obj.define_property(
            "fixed".into(),
            PropertyDescriptor::data_with_attrs(Value::int32(1), PropertyAttributes::frozen()),
        );
        assert!(!obj.set("fixed".into(), Value::int32(2)));
        assert!(!obj.delete(&"fixed".into()));
        assert_eq!(obj.get(&"fixed".into()), Some(Value::int32(1)));
    }

    #[test]
    fn test_delete_preserves_order() {
        let obj = JsObject::new(None);
        obj.set("a".into(), Value::int32(1));
        obj.set("b".into(), Value::int32(2));
        obj.set("c".into(), Value::int32(3));
        assert!(obj.delete(&"b".into()));
        assert_eq!(obj.own_keys(), vec![PropertyKey::string("a"), PropertyKey::string("c")]);
    }

    #[test]
    fn test_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsObject>();
    }
}
