//! Value classification and the clone policy table
//!
//! Classification looks only at the [`HeapRef`] tag, never at shape or
//! prototype, so a Map created with a custom prototype is still a keyed
//! collection and an ordinary object is composite whatever its prototype is.

use crate::options::CloneMode;
use crate::value::{HeapRef, Value};

/// Category of a value, as far as cloning is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// undefined, null, boolean, number, string, bigint
    Primitive,
    /// Plain object or array
    Composite,
    /// Map
    KeyedCollection,
    /// Set
    UniqueCollection,
    /// ArrayBuffer, typed arrays, DataView
    Buffer,
    /// Date
    Temporal,
    /// RegExp
    Pattern,
    /// WeakMap, WeakSet
    WeakCollection,
    /// Functions, errors, boxed primitives, symbols, host objects
    Opaque,
}

impl ValueClass {
    /// Whether this is one of the built-ins copy mode duplicates
    pub fn is_copyable_builtin(&self) -> bool {
        matches!(
            self,
            Self::KeyedCollection
                | Self::UniqueCollection
                | Self::Buffer
                | Self::Temporal
                | Self::Pattern
        )
    }
}

/// What the walker does with a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClonePolicy {
    /// Return as-is without touching the identity map
    Return,
    /// Return the original reference and record it as its own clone
    Share,
    /// Allocate a new container and clone members recursively
    Structural,
    /// Allocate a new instance of the same built-in and copy its contents
    Copy,
}

/// Classify a value. Pure; never recurses.
pub fn classify(value: &Value) -> ValueClass {
    let Some(heap) = value.heap_ref() else {
        return ValueClass::Primitive;
    };
    match heap {
        HeapRef::Object(_) | HeapRef::Array(_) => ValueClass::Composite,
        HeapRef::Map(_) => ValueClass::KeyedCollection,
        HeapRef::Set(_) => ValueClass::UniqueCollection,
        HeapRef::ArrayBuffer(_) | HeapRef::TypedArray(_) | HeapRef::DataView(_) => {
            ValueClass::Buffer
        }
        HeapRef::Date(_) => ValueClass::Temporal,
        HeapRef::RegExp(_) => ValueClass::Pattern,
        HeapRef::WeakMap(_) | HeapRef::WeakSet(_) => ValueClass::WeakCollection,
        HeapRef::Function(_)
        | HeapRef::Error(_)
        | HeapRef::Boxed(_)
        | HeapRef::Symbol(_)
        | HeapRef::External(_) => ValueClass::Opaque,
    }
}

/// The dispatch table: policy for a class under a mode
pub fn policy(class: ValueClass, mode: CloneMode) -> ClonePolicy {
    match (class, mode) {
        (ValueClass::Primitive, _) => ClonePolicy::Return,
        (ValueClass::Composite, _) => ClonePolicy::Structural,
        (ValueClass::WeakCollection | ValueClass::Opaque, _) => ClonePolicy::Share,
        (
            ValueClass::KeyedCollection
            | ValueClass::UniqueCollection
            | ValueClass::Buffer
            | ValueClass::Temporal
            | ValueClass::Pattern,
            CloneMode::Clone,
        ) => ClonePolicy::Share,
        (
            ValueClass::KeyedCollection
            | ValueClass::UniqueCollection
            | ValueClass::Buffer
            | ValueClass::Temporal
            | ValueClass::Pattern,
            CloneMode::Copy,
        ) => ClonePolicy::Copy,
    }
}
