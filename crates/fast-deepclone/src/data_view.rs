//! DataView implementation
//!
//! DataView reads and writes arbitrary numeric types at arbitrary byte
//! offsets of an ArrayBuffer, in either byte order.

use std::sync::Arc;

use crate::array_buffer::JsArrayBuffer;
use crate::error::{ValueError, ValueResult};
use crate::object::JsObject;

/// A JavaScript DataView
#[derive(Debug)]
pub struct JsDataView {
    /// Associated JavaScript object (for properties and prototype)
    pub object: Arc<JsObject>,
    buffer: Arc<JsArrayBuffer>,
    byte_offset: usize,
    byte_length: usize,
}

impl JsDataView {
    /// Create a view over `buffer`. `byte_length` defaults to the rest of the buffer.
    pub fn new(
        buffer: Arc<JsArrayBuffer>,
        byte_offset: usize,
        byte_length: Option<usize>,
        prototype: Option<Arc<JsObject>>,
    ) -> ValueResult<Self> {
        if buffer.is_detached() {
            return Err(ValueError::Detached);
        }
        let buffer_len = buffer.byte_length();
        if byte_offset > buffer_len {
            return Err(ValueError::range_error(format!(
                "start offset {byte_offset} is outside the bounds of the buffer"
            )));
        }
        let byte_length = byte_length.unwrap_or(buffer_len - byte_offset);
        let in_bounds = byte_offset
            .checked_add(byte_length)
            .is_some_and(|end| end <= buffer_len);
        if !in_bounds {
            return Err(ValueError::range_error(format!(
                "invalid DataView length {byte_length}"
            )));
        }
        Ok(Self {
            object: Arc::new(JsObject::new(prototype)),
            buffer,
            byte_offset,
            byte_length,
        })
    }

    /// Get the underlying buffer
    pub fn buffer(&self) -> &Arc<JsArrayBuffer> {
        &self.buffer
    }

    /// Get the byte offset into the buffer
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Get the byte length (0 if detached)
    pub fn byte_length(&self) -> usize {
        if self.is_detached() { 0 } else { self.byte_length }
    }

    /// Check if the underlying buffer is detached
    pub fn is_detached(&self) -> bool {
        self.buffer.is_detached()
    }

    /// Copy of the bytes this view covers
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer
            .read(self.byte_offset, self.byte_length())
            .unwrap_or_default()
    }

    fn check_bounds(&self, offset: usize, len: usize) -> ValueResult<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.byte_length => Ok(()),
            _ => Err(ValueError::range_error("offset is outside the bounds of the DataView")),
        }
    }

    fn read<const N: usize>(&self, offset: usize) -> ValueResult<[u8; N]> {
        if self.is_detached() {
            return Err(ValueError::Detached);
        }
        self.check_bounds(offset, N)?;
        let bytes = self
            .buffer
            .read(self.byte_offset + offset, N)
            .ok_or(ValueError::Detached)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    fn write(&self, offset: usize, bytes: &[u8]) -> ValueResult<()> {
        if self.is_detached() {
            return Err(ValueError::Detached);
        }
        self.check_bounds(offset, bytes.len())?;
        if self.buffer.write(self.byte_offset + offset, bytes) {
            Ok(())
        } else {
            Err(ValueError::Detached)
        }
    }

    /// `getInt8`
    pub fn get_int8(&self, offset: usize) -> ValueResult<i8> {
        Ok(self.read::<1>(offset)?[0] as i8)
    }

    /// `setInt8`
    pub fn set_int8(&self, offset: usize, value: i8) -> ValueResult<()> {
        self.write(offset, &value.to_le_bytes())
    }

    /// `getUint8`
    pub fn get_uint8(&self, offset: usize) -> ValueResult<u8> {
        Ok(self.read::<1>(offset)?[0])
    }

    /// `setUint8`
    pub fn set_uint8(&self, offset: usize, value: u8) -> ValueResult<()> {
        self.write(offset, &[value])
    }

    /// `getUint16`
    pub fn get_uint16(&self, offset: usize, little_endian: bool) -> ValueResult<u16> {
        let bytes = self.read::<2>(offset)?;
        Ok(if little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        })
    }

    /// `setUint16`
    pub fn set_uint16(&self, offset: usize, value: u16, little_endian: bool) -> ValueResult<()> {
        let bytes = if little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write(offset, &bytes)
    }

    /// `getFloat64`
    pub fn get_float64(&self, offset: usize, little_endian: bool) -> ValueResult<f64> {
        let bytes = self.read::<8>(offset)?;
        Ok(if little_endian {
            f64::from_le_bytes(bytes)
        } else {
            f64::from_be_bytes(bytes)
        })
    }

    /// `setFloat64`
    pub fn set_float64(&self, offset: usize, value: f64, little_endian: bool) -> ValueResult<()> {
        let bytes = if little_endian {
            value.to_le_bytes()
        } else {
            value.to_be_bytes()
        };
        self.write(offset, &bytes)
    }
}
