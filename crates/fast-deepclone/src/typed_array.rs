//! TypedArray implementation
//!
//! TypedArrays are views over ArrayBuffer, providing typed access to binary data.
//! All 11 types share common implementation via TypedArrayKind. Elements are
//! stored little-endian.

use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use crate::array_buffer::JsArrayBuffer;
use crate::error::{ValueError, ValueResult};
use crate::object::JsObject;

/// The kind of TypedArray - determines element size and interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    /// Int8Array - 8-bit signed integers
    Int8,
    /// Uint8Array - 8-bit unsigned integers (also Node's Buffer)
    Uint8,
    /// Uint8ClampedArray - 8-bit unsigned integers (clamped)
    Uint8Clamped,
    /// Int16Array - 16-bit signed integers
    Int16,
    /// Uint16Array - 16-bit unsigned integers
    Uint16,
    /// Int32Array - 32-bit signed integers
    Int32,
    /// Uint32Array - 32-bit unsigned integers
    Uint32,
    /// Float32Array - 32-bit floating point
    Float32,
    /// Float64Array - 64-bit floating point
    Float64,
    /// BigInt64Array - 64-bit signed integers
    BigInt64,
    /// BigUint64Array - 64-bit unsigned integers
    BigUint64,
}

impl TypedArrayKind {
    /// All kinds, in declaration order
    pub const ALL: [TypedArrayKind; 11] = [
        Self::Int8,
        Self::Uint8,
        Self::Uint8Clamped,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
        Self::BigInt64,
        Self::BigUint64,
    ];

    /// Get the byte size of each element
    pub fn element_size(&self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 | Self::Uint8Clamped => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 | Self::BigInt64 | Self::BigUint64 => 8,
        }
    }

    /// Get the name of this TypedArray type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
            Self::BigInt64 => "BigInt64Array",
            Self::BigUint64 => "BigUint64Array",
        }
    }

    /// Look up a kind by its constructor name
    pub fn from_name(name: &str) -> ValueResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ValueError::type_error(format!("{name} is not a TypedArray")))
    }

    /// Check if this is a BigInt typed array
    pub fn is_bigint(&self) -> bool {
        matches!(self, Self::BigInt64 | Self::BigUint64)
    }

    /// Decode one element from `element_size()` little-endian bytes
    fn decode(&self, bytes: &[u8]) -> f64 {
        let mut b = [0u8; 8];
        b[..bytes.len().min(8)].copy_from_slice(&bytes[..bytes.len().min(8)]);
        match self {
            Self::Int8 => b[0] as i8 as f64,
            Self::Uint8 | Self::Uint8Clamped => b[0] as f64,
            Self::Int16 => i16::from_le_bytes([b[0], b[1]]) as f64,
            Self::Uint16 => u16::from_le_bytes([b[0], b[1]]) as f64,
            Self::Int32 => i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64,
            Self::Uint32 => u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64,
            Self::Float32 => f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64,
            Self::Float64 => f64::from_le_bytes(b),
            Self::BigInt64 => i64::from_le_bytes(b) as f64,
            Self::BigUint64 => u64::from_le_bytes(b) as f64,
        }
    }

    /// Encode `value` with the ECMAScript conversion for this kind
    fn encode(&self, value: f64) -> Vec<u8> {
        match self {
            Self::Int8 => (wrap_integer(value, 8) as u8).to_le_bytes().to_vec(),
            Self::Uint8 => (wrap_integer(value, 8) as u8).to_le_bytes().to_vec(),
            Self::Uint8Clamped => vec![clamp_uint8(value)],
            Self::Int16 | Self::Uint16 => (wrap_integer(value, 16) as u16).to_le_bytes().to_vec(),
            Self::Int32 | Self::Uint32 => (wrap_integer(value, 32) as u32).to_le_bytes().to_vec(),
            Self::Float32 => (value as f32).to_le_bytes().to_vec(),
            Self::Float64 => value.to_le_bytes().to_vec(),
            Self::BigInt64 | Self::BigUint64 => wrap_integer(value, 64).to_le_bytes().to_vec(),
        }
    }
}

/// ToIntN / ToUintN: truncate, then reduce modulo 2^bits
fn wrap_integer(value: f64, bits: i32) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    if bits >= 64 {
        return value.trunc() as i64 as u64;
    }
    let modulus = 2f64.powi(bits);
    value.trunc().rem_euclid(modulus) as u64
}

/// ToUint8Clamp: clamp to 0..=255, round half to even
fn clamp_uint8(value: f64) -> u8 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value.round_ties_even() as u8
    }
}

/// A JavaScript TypedArray
///
/// TypedArray is a view over an ArrayBuffer, providing typed access to binary data.
/// It does not copy data - it references the underlying buffer.
#[derive(Debug)]
pub struct JsTypedArray {
    /// Associated JavaScript object (for properties and prototype)
    pub object: Arc<JsObject>,
    /// The underlying ArrayBuffer
    buffer: Arc<JsArrayBuffer>,
    /// Byte offset into the buffer
    byte_offset: usize,
    /// Number of elements (not bytes)
    length: usize,
    /// The kind of typed array
    kind: TypedArrayKind,
}

impl JsTypedArray {
    /// Create a new TypedArray view over an ArrayBuffer
    pub fn new(
        buffer: Arc<JsArrayBuffer>,
        kind: TypedArrayKind,
        byte_offset: usize,
        length: usize,
        prototype: Option<Arc<JsObject>>,
    ) -> ValueResult<Self> {
        let elem_size = kind.element_size();

        if buffer.is_detached() {
            return Err(ValueError::Detached);
        }

        // Validate alignment
        if byte_offset % elem_size != 0 {
            return Err(ValueError::range_error(format!(
                "start offset of {} should be a multiple of {elem_size}",
                kind.name()
            )));
        }

        // Validate bounds
        let byte_length = length
            .checked_mul(elem_size)
            .ok_or_else(|| ValueError::range_error("TypedArray length overflow"))?;
        let end = byte_offset
            .checked_add(byte_length)
            .ok_or_else(|| ValueError::range_error("TypedArray offset overflow"))?;
        if end > buffer.byte_length() {
            return Err(ValueError::range_error(format!(
                "invalid {} length {length}",
                kind.name()
            )));
        }

        Ok(Self {
            object: Arc::new(JsObject::new(prototype)),
            buffer,
            byte_offset,
            length,
            kind,
        })
    }

    /// Create a new zero-filled TypedArray with its own buffer
    pub fn with_length(
        kind: TypedArrayKind,
        length: usize,
        prototype: Option<Arc<JsObject>>,
    ) -> Self {
        let buffer = Arc::new(JsArrayBuffer::new(length * kind.element_size(), None));
        Self {
            object: Arc::new(JsObject::new(prototype)),
            buffer,
            byte_offset: 0,
            length,
            kind,
        }
    }

    /// Create a TypedArray with its own buffer, converting each value
    /// (`new Float64Array([1, 2, 3])`)
    pub fn from_values(
        kind: TypedArrayKind,
        values: &[f64],
        prototype: Option<Arc<JsObject>>,
    ) -> Self {
        let array = Self::with_length(kind, values.len(), prototype);
        for (i, value) in values.iter().enumerate() {
            array.set(i, *value);
        }
        array
    }

    /// Get the kind
    pub fn kind(&self) -> TypedArrayKind {
        self.kind
    }

    /// Get the underlying buffer
    pub fn buffer(&self) -> &Arc<JsArrayBuffer> {
        &self.buffer
    }

    /// Get the byte offset
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Get the length in elements (0 if detached)
    pub fn length(&self) -> usize {
        if self.is_detached() { 0 } else { self.length }
    }

    /// Get the length in bytes (0 if detached)
    pub fn byte_length(&self) -> usize {
        self.length() * self.kind.element_size()
    }

    /// Check if the underlying buffer is detached
    pub fn is_detached(&self) -> bool {
        self.buffer.is_detached()
    }

    /// Read the element at `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.length() {
            return None;
        }
        let size = self.kind.element_size();
        let bytes = self.buffer.read(self.byte_offset + index * size, size)?;
        Some(self.kind.decode(&bytes))
    }

    /// Write the element at `index`. Returns `false` if out of bounds.
    pub fn set(&self, index: usize, value: f64) -> bool {
        if index >= self.length() {
            return false;
        }
        let size = self.kind.element_size();
        self.buffer
            .write(self.byte_offset + index * size, &self.kind.encode(value))
    }

    /// Copy of the bytes this view covers
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer
            .read(self.byte_offset, self.byte_length())
            .unwrap_or_default()
    }

    /// Read a BigInt64/BigUint64 element without going through f64
    pub fn get_bigint(&self, index: usize) -> Option<BigInt> {
        if !self.kind.is_bigint() || index >= self.length() {
            return None;
        }
        let bytes = self.buffer.read(self.byte_offset + index * 8, 8)?;
        let mut b = [0u8; 8];
        b.copy_from_slice(&bytes);
        Some(match self.kind {
            TypedArrayKind::BigInt64 => BigInt::from(i64::from_le_bytes(b)),
            _ => BigInt::from(u64::from_le_bytes(b)),
        })
    }

    /// Write a BigInt element, reduced modulo 2^64
    pub fn set_bigint(&self, index: usize, value: &BigInt) -> bool {
        if !self.kind.is_bigint() || index >= self.length() {
            return false;
        }
        let modulus = BigInt::one() << 64u32;
        let wrapped = ((value % &modulus) + &modulus) % &modulus;
        let Some(bits) = wrapped.to_u64() else {
            return false;
        };
        self.buffer
            .write(self.byte_offset + index * 8, &bits.to_le_bytes())
    }
}
