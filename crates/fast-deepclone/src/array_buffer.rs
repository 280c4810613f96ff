//! ArrayBuffer implementation
//!
//! ArrayBuffer is the foundation for TypedArrays and DataView.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::object::JsObject;

/// A JavaScript ArrayBuffer
///
/// ArrayBuffer represents a raw buffer of binary data. It can be detached
/// (transferred), after which its byte length is zero.
#[derive(Debug)]
pub struct JsArrayBuffer {
    /// The object portion (properties, prototype, etc.)
    pub object: Arc<JsObject>,
    /// The underlying byte data. None if detached.
    data: RwLock<Option<Vec<u8>>>,
}

impl JsArrayBuffer {
    /// Create a new zero-filled ArrayBuffer with the specified byte length
    pub fn new(byte_length: usize, prototype: Option<Arc<JsObject>>) -> Self {
        Self::from_bytes(vec![0; byte_length], prototype)
    }

    /// Create an ArrayBuffer that takes ownership of `bytes`
    pub fn from_bytes(bytes: Vec<u8>, prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            object: Arc::new(JsObject::new(prototype)),
            data: RwLock::new(Some(bytes)),
        }
    }

    /// Check if the buffer is detached
    pub fn is_detached(&self) -> bool {
        self.data.read().is_none()
    }

    /// Detach the buffer (for transfer operations)
    pub fn detach(&self) {
        *self.data.write() = None;
    }

    /// Get the byte length (0 if detached)
    pub fn byte_length(&self) -> usize {
        self.data.read().as_ref().map_or(0, Vec::len)
    }

    /// Copy `len` bytes starting at `offset`.
    /// Returns `None` if detached or out of bounds.
    pub fn read(&self, offset: usize, len: usize) -> Option<Vec<u8>> {
        let data = self.data.read();
        let data = data.as_ref()?;
        let end = offset.checked_add(len)?;
        data.get(offset..end).map(<[u8]>::to_vec)
    }

    /// Write `bytes` at `offset`. Returns `false` if detached or out of bounds.
    pub fn write(&self, offset: usize, bytes: &[u8]) -> bool {
        let mut data = self.data.write();
        let Some(data) = data.as_mut() else {
            return false;
        };
        let Some(end) = offset.checked_add(bytes.len()) else {
            return false;
        };
        match data.get_mut(offset..end) {
            Some(target) => {
                target.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    /// Copy of the whole contents (empty if detached)
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.read().clone().unwrap_or_default()
    }

    /// Create a new buffer holding a copy of bytes `start..end`.
    /// Returns `None` if detached or the range is invalid.
    pub fn slice(&self, start: usize, end: usize) -> Option<JsArrayBuffer> {
        let bytes = self.read(start, end.checked_sub(start)?)?;
        Some(JsArrayBuffer::from_bytes(bytes, None))
    }
}
