//! Primitive encoding/decoding for the tag-tree binary format.
//!
//! All multi-byte values are big-endian. Strings carry an unsigned 16-bit
//! length prefix; arrays and lists carry a signed 32-bit one.

use crate::error::DecodeError;
use crate::model::TagType;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { context })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(
        &mut self,
        context: &'static str,
    ) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    /// Reads a signed byte.
    #[inline]
    pub fn read_i8(&mut self, context: &'static str) -> Result<i8, DecodeError> {
        Ok(i8::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a big-endian i16.
    #[inline]
    pub fn read_i16(&mut self, context: &'static str) -> Result<i16, DecodeError> {
        Ok(i16::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a big-endian i32.
    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a big-endian i64.
    #[inline]
    pub fn read_i64(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a big-endian IEEE-754 f32. NaN payloads are kept as-is.
    #[inline]
    pub fn read_f32(&mut self, context: &'static str) -> Result<f32, DecodeError> {
        Ok(f32::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a big-endian IEEE-754 f64. NaN payloads are kept as-is.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_be_bytes(self.read_array(context)?))
    }

    /// Reads a signed 32-bit length prefix, rejecting negative values.
    pub fn read_length(&mut self, field: &'static str) -> Result<usize, DecodeError> {
        let len = self.read_i32(field)?;
        usize::try_from(len).map_err(|_| DecodeError::NegativeLength { field, len })
    }

    /// Reads a u16-length-prefixed string.
    ///
    /// The payload is not required to be valid UTF-8; invalid sequences are
    /// replaced rather than rejected.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.read_u16(field)? as usize;
        let bytes = self.read_bytes(len, field)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Reads a 1-byte tag type id.
    pub fn read_tag_type(&mut self, context: &'static str) -> Result<TagType, DecodeError> {
        let tag_type = self.read_byte(context)?;
        TagType::from_u8(tag_type).ok_or(DecodeError::InvalidTagType { tag_type, context })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for producing big-endian tag-tree bytes.
///
/// Only primitives are provided; callers lay out entries themselves.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a u16-length-prefixed string.
    ///
    /// Strings longer than 65535 bytes are cut at that length.
    pub fn write_string(&mut self, s: &str) {
        let bytes = &s.as_bytes()[..s.len().min(u16::MAX as usize)];
        self.write_u16(bytes.len() as u16);
        self.buf.extend_from_slice(bytes);
    }

    /// Writes the header of a named entry: type id followed by the name.
    pub fn write_entry_header(&mut self, tag_type: TagType, name: &str) {
        self.write_byte(tag_type as u8);
        self.write_string(name);
    }

    /// Writes the END marker that closes a compound.
    pub fn write_end(&mut self) {
        self.write_byte(TagType::End as u8);
    }
}
