//! JavaScript values
//!
//! A [`Value`] is either an inline primitive or a [`HeapRef`] to a
//! reference-counted heap node. Primitives compare by content; heap nodes
//! compare by pointer identity, which is what the clone engine keys its
//! identity map on.
//!
//! Every heap kind except symbols carries a base [`JsObject`] that holds its
//! own properties and its prototype link. Behavior added by "subclassing" a
//! built-in (overridden methods, extra fields) therefore lives either on the
//! prototype chain or in the base object's own properties.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;

use crate::array_buffer::JsArrayBuffer;
use crate::boxed::JsBoxedPrimitive;
use crate::data_view::JsDataView;
use crate::date::JsDate;
use crate::error_object::JsError;
use crate::external::JsExternal;
use crate::function::JsFunction;
use crate::map_data::{JsMap, JsSet};
use crate::object::JsObject;
use crate::regexp::JsRegExp;
use crate::string::JsString;
use crate::symbol::Symbol;
use crate::typed_array::JsTypedArray;
use crate::weak_collection::{JsWeakMap, JsWeakSet};

/// A JavaScript value
#[derive(Clone)]
pub enum Value {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// Boolean primitive
    Boolean(bool),
    /// Number primitive (IEEE 754 double)
    Number(f64),
    /// String primitive
    String(JsString),
    /// BigInt primitive
    BigInt(Arc<BigInt>),
    /// Reference to a heap node
    Heap(HeapRef),
}

/// Reference to heap-allocated data
#[derive(Clone)]
pub enum HeapRef {
    /// Ordinary object, including instances of user classes
    Object(Arc<JsObject>),
    /// Array (stored as an object with an element vector)
    Array(Arc<JsObject>),
    /// Callable
    Function(Arc<JsFunction>),
    /// Error instance
    Error(Arc<JsError>),
    /// Boolean, Number, String, BigInt or Symbol wrapper object
    Boxed(Arc<JsBoxedPrimitive>),
    /// Symbol
    Symbol(Arc<Symbol>),
    /// Map
    Map(Arc<JsMap>),
    /// Set
    Set(Arc<JsSet>),
    /// WeakMap
    WeakMap(Arc<JsWeakMap>),
    /// WeakSet
    WeakSet(Arc<JsWeakSet>),
    /// ArrayBuffer (raw binary data buffer)
    ArrayBuffer(Arc<JsArrayBuffer>),
    /// TypedArray (view over ArrayBuffer)
    TypedArray(Arc<JsTypedArray>),
    /// DataView (arbitrary byte-order access to ArrayBuffer)
    DataView(Arc<JsDataView>),
    /// Date
    Date(Arc<JsDate>),
    /// RegExp
    RegExp(Arc<JsRegExp>),
    /// Host object the value model knows nothing about (promises, proxies, handles)
    External(Arc<JsExternal>),
}

fn addr<T>(arc: &Arc<T>) -> usize {
    Arc::as_ptr(arc) as *const () as usize
}

impl HeapRef {
    /// Address of the heap node; stable for as long as the node is alive
    pub fn identity(&self) -> usize {
        match self {
            Self::Object(o) | Self::Array(o) => addr(o),
            Self::Function(f) => addr(f),
            Self::Error(e) => addr(e),
            Self::Boxed(b) => addr(b),
            Self::Symbol(s) => addr(s),
            Self::Map(m) => addr(m),
            Self::Set(s) => addr(s),
            Self::WeakMap(m) => addr(m),
            Self::WeakSet(s) => addr(s),
            Self::ArrayBuffer(ab) => addr(ab),
            Self::TypedArray(ta) => addr(ta),
            Self::DataView(dv) => addr(dv),
            Self::Date(d) => addr(d),
            Self::RegExp(r) => addr(r),
            Self::External(x) => addr(x),
        }
    }

    /// Whether both references point at the same heap node
    pub fn ptr_eq(&self, other: &HeapRef) -> bool {
        self.identity() == other.identity()
    }

    /// The object holding own properties and the prototype link.
    /// `None` for symbols, which have neither.
    pub fn base_object(&self) -> Option<&Arc<JsObject>> {
        match self {
            Self::Object(o) | Self::Array(o) => Some(o),
            Self::Function(f) => Some(&f.object),
            Self::Error(e) => Some(&e.object),
            Self::Boxed(b) => Some(&b.object),
            Self::Symbol(_) => None,
            Self::Map(m) => Some(&m.object),
            Self::Set(s) => Some(&s.object),
            Self::WeakMap(m) => Some(&m.object),
            Self::WeakSet(s) => Some(&s.object),
            Self::ArrayBuffer(ab) => Some(&ab.object),
            Self::TypedArray(ta) => Some(&ta.object),
            Self::DataView(dv) => Some(&dv.object),
            Self::Date(d) => Some(&d.object),
            Self::RegExp(r) => Some(&r.object),
            Self::External(x) => Some(&x.object),
        }
    }

    /// Built-in kind name, used for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "Object",
            Self::Array(_) => "Array",
            Self::Function(_) => "Function",
            Self::Error(e) => e.kind().name(),
            Self::Boxed(b) => b.class_name(),
            Self::Symbol(_) => "Symbol",
            Self::Map(_) => "Map",
            Self::Set(_) => "Set",
            Self::WeakMap(_) => "WeakMap",
            Self::WeakSet(_) => "WeakSet",
            Self::ArrayBuffer(_) => "ArrayBuffer",
            Self::TypedArray(ta) => ta.kind().name(),
            Self::DataView(_) => "DataView",
            Self::Date(_) => "Date",
            Self::RegExp(_) => "RegExp",
            Self::External(x) => x.type_name(),
        }
    }
}

impl fmt::Debug for HeapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} @{:#x}]", self.kind_name(), self.identity())
    }
}

impl Value {
    /// `undefined`
    pub const fn undefined() -> Self {
        Self::Undefined
    }

    /// `null`
    pub const fn null() -> Self {
        Self::Null
    }

    /// Boolean primitive
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Number primitive
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Number primitive from an integer
    pub const fn int32(n: i32) -> Self {
        Self::Number(n as f64)
    }

    /// String primitive
    pub fn string(s: impl Into<JsString>) -> Self {
        Self::String(s.into())
    }

    /// BigInt primitive
    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Self::BigInt(Arc::new(n.into()))
    }

    /// Ordinary object
    pub fn object(obj: Arc<JsObject>) -> Self {
        Self::Heap(HeapRef::Object(obj))
    }

    /// Array
    pub fn array(arr: Arc<JsObject>) -> Self {
        Self::Heap(HeapRef::Array(arr))
    }

    /// Function
    pub fn function(func: Arc<JsFunction>) -> Self {
        Self::Heap(HeapRef::Function(func))
    }

    /// Error instance
    pub fn error(err: Arc<JsError>) -> Self {
        Self::Heap(HeapRef::Error(err))
    }

    /// Boxed primitive
    pub fn boxed(b: Arc<JsBoxedPrimitive>) -> Self {
        Self::Heap(HeapRef::Boxed(b))
    }

    /// Symbol
    pub fn symbol(s: Arc<Symbol>) -> Self {
        Self::Heap(HeapRef::Symbol(s))
    }

    /// Map
    pub fn map(m: Arc<JsMap>) -> Self {
        Self::Heap(HeapRef::Map(m))
    }

    /// Set
    pub fn set(s: Arc<JsSet>) -> Self {
        Self::Heap(HeapRef::Set(s))
    }

    /// WeakMap
    pub fn weak_map(m: Arc<JsWeakMap>) -> Self {
        Self::Heap(HeapRef::WeakMap(m))
    }

    /// WeakSet
    pub fn weak_set(s: Arc<JsWeakSet>) -> Self {
        Self::Heap(HeapRef::WeakSet(s))
    }

    /// ArrayBuffer
    pub fn array_buffer(ab: Arc<JsArrayBuffer>) -> Self {
        Self::Heap(HeapRef::ArrayBuffer(ab))
    }

    /// TypedArray
    pub fn typed_array(ta: Arc<JsTypedArray>) -> Self {
        Self::Heap(HeapRef::TypedArray(ta))
    }

    /// DataView
    pub fn data_view(dv: Arc<JsDataView>) -> Self {
        Self::Heap(HeapRef::DataView(dv))
    }

    /// Date
    pub fn date(d: Arc<JsDate>) -> Self {
        Self::Heap(HeapRef::Date(d))
    }

    /// RegExp
    pub fn regexp(r: Arc<JsRegExp>) -> Self {
        Self::Heap(HeapRef::RegExp(r))
    }

    /// Host object
    pub fn external(x: Arc<JsExternal>) -> Self {
        Self::Heap(HeapRef::External(x))
    }

    /// Check if undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check if null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if null or undefined
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Check if a boolean primitive
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Check if a number primitive
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Check if a string primitive
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Check if an ordinary object
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Heap(HeapRef::Object(_)))
    }

    /// Check if an array
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Heap(HeapRef::Array(_)))
    }

    /// Check if a callable
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Heap(HeapRef::Function(_)))
    }

    /// Whether the value is held inline (not a heap reference)
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Heap(_))
    }

    /// Get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_string(&self) -> Option<&JsString> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as BigInt
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Self::BigInt(b) => Some(b),
            _ => None,
        }
    }

    /// Get the heap reference, if any
    pub fn heap_ref(&self) -> Option<&HeapRef> {
        match self {
            Self::Heap(h) => Some(h),
            _ => None,
        }
    }

    /// Get as ordinary object
    pub fn as_object(&self) -> Option<&Arc<JsObject>> {
        match self {
            Self::Heap(HeapRef::Object(o)) => Some(o),
            _ => None,
        }
    }

    /// Get as array
    pub fn as_array(&self) -> Option<&Arc<JsObject>> {
        match self {
            Self::Heap(HeapRef::Array(a)) => Some(a),
            _ => None,
        }
    }

    /// Get as function
    pub fn as_function(&self) -> Option<&Arc<JsFunction>> {
        match self {
            Self::Heap(HeapRef::Function(f)) => Some(f),
            _ => None,
        }
    }

    /// Get as error instance
    pub fn as_error(&self) -> Option<&Arc<JsError>> {
        match self {
            Self::Heap(HeapRef::Error(e)) => Some(e),
            _ => None,
        }
    }

    /// Get as Map
    pub fn as_map(&self) -> Option<&Arc<JsMap>> {
        match self {
            Self::Heap(HeapRef::Map(m)) => Some(m),
            _ => None,
        }
    }

    /// Get as Set
    pub fn as_set(&self) -> Option<&Arc<JsSet>> {
        match self {
            Self::Heap(HeapRef::Set(s)) => Some(s),
            _ => None,
        }
    }

    /// Get as ArrayBuffer
    pub fn as_array_buffer(&self) -> Option<&Arc<JsArrayBuffer>> {
        match self {
            Self::Heap(HeapRef::ArrayBuffer(ab)) => Some(ab),
            _ => None,
        }
    }

    /// Get as TypedArray
    pub fn as_typed_array(&self) -> Option<&Arc<JsTypedArray>> {
        match self {
            Self::Heap(HeapRef::TypedArray(ta)) => Some(ta),
            _ => None,
        }
    }

    /// Get as DataView
    pub fn as_data_view(&self) -> Option<&Arc<JsDataView>> {
        match self {
            Self::Heap(HeapRef::DataView(dv)) => Some(dv),
            _ => None,
        }
    }

    /// Get as Date
    pub fn as_date(&self) -> Option<&Arc<JsDate>> {
        match self {
            Self::Heap(HeapRef::Date(d)) => Some(d),
            _ => None,
        }
    }

    /// Get as RegExp
    pub fn as_regexp(&self) -> Option<&Arc<JsRegExp>> {
        match self {
            Self::Heap(HeapRef::RegExp(r)) => Some(r),
            _ => None,
        }
    }

    /// The `typeof` string
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "object",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::BigInt(_) => "bigint",
            Self::Heap(HeapRef::Symbol(_)) => "symbol",
            Self::Heap(HeapRef::Function(_)) => "function",
            Self::Heap(_) => "object",
        }
    }

    /// `===`: primitives by value, heap nodes by identity. NaN is unequal to itself.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::Heap(a), Self::Heap(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// SameValueZero: like `===` except NaN equals NaN
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::BigInt(b) => write!(f, "{b}n"),
            Self::Heap(h) => write!(f, "{h:?}"),
        }
    }
}

impl From<HeapRef> for Value {
    fn from(heap: HeapRef) -> Self {
        Self::Heap(heap)
    }
}
