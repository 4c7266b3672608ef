use crate::encoding::Encoding;
use crate::error::BufferError;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// The three shapes a buffer can be built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferInput {
    BySize(usize),
    ByText(String, Encoding),
    ByBytes(Vec<u8>),
}

impl BufferInput {
    /// Map a dynamically typed JSON value onto an input shape.
    ///
    /// Non-negative integers are sizes, strings are text in `encoding`,
    /// arrays of integers are byte values (masked to their low 8 bits).
    /// Anything else is `InvalidInput`.
    pub fn from_json(value: &Value, encoding: Encoding) -> Result<Self, BufferError> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|size| usize::try_from(size).ok())
                .filter(|&size| size <= isize::MAX as usize)
                .map(BufferInput::BySize)
                .ok_or_else(|| {
                    debug!("Rejecting buffer size {}", n);
                    BufferError::InvalidInput(format!(
                        "size must be a non-negative integer no larger than {}, got {}",
                        isize::MAX,
                        n
                    ))
                }),
            Value::String(text) => Ok(BufferInput::ByText(text.clone(), encoding)),
            Value::Array(items) => {
                let mut bytes = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let v = item
                        .as_i64()
                        .or_else(|| item.as_u64().map(|v| v as i64))
                        .ok_or_else(|| {
                            debug!("Rejecting array element {} at index {}", item, i);
                            BufferError::InvalidInput(format!(
                                "element {} is not an integer: {}",
                                i, item
                            ))
                        })?;
                    bytes.push(low_byte(v));
                }
                Ok(BufferInput::ByBytes(bytes))
            }
            other => {
                debug!("Rejecting buffer input {}", other);
                Err(BufferError::InvalidInput(format!(
                    "expected a size, string or array of bytes, got {}",
                    json_kind(other)
                )))
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn low_byte(value: i64) -> u8 {
    (value & 0xff) as u8
}

/// Fixed-capacity byte buffer. The length is set at construction and never
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteBuffer {
    buf: Box<[u8]>,
}

impl ByteBuffer {
    pub fn new(input: BufferInput) -> Result<Self, BufferError> {
        match input {
            BufferInput::BySize(size) => Self::try_alloc(size),
            BufferInput::ByText(text, encoding) => Self::from_text(&text, encoding),
            BufferInput::ByBytes(bytes) => Ok(Self::from(bytes)),
        }
    }

    /// `size` zeroed bytes
    pub fn alloc(size: usize) -> Self {
        trace!("Allocating {} byte buffer", size);
        Self {
            buf: vec![0u8; size].into_boxed_slice(),
        }
    }

    /// Like `alloc`, but a size that can't be allocated is `InvalidInput`
    /// instead of a panic.
    pub fn try_alloc(size: usize) -> Result<Self, BufferError> {
        trace!("Allocating {} byte buffer", size);
        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(size).map_err(|e| {
            debug!("Cannot allocate {} bytes: {}", size, e);
            BufferError::InvalidInput(format!("cannot allocate {} bytes: {}", size, e))
        })?;
        buf.resize(size, 0);
        Ok(Self::from(buf))
    }

    pub fn from_text(text: &str, encoding: Encoding) -> Result<Self, BufferError> {
        let bytes = encoding.encode(text)?;
        Ok(Self::from(bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }

    /// Convenience constructor; same as `from_text`.
    pub fn from_encoded(data: &str, encoding: Encoding) -> Result<Self, BufferError> {
        Self::from_text(data, encoding)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.into_vec()
    }

    /// Copy the encoded `text` over the front of the buffer.
    ///
    /// Bytes that don't fit are dropped and bytes past the copied prefix keep
    /// their old values. Returns how many bytes were copied. Nothing is
    /// written if `text` fails to encode.
    pub fn write(&mut self, text: &str, encoding: Encoding) -> Result<usize, BufferError> {
        let data = encoding.encode(text)?;
        let n = data.len().min(self.buf.len());
        if n < data.len() {
            debug!("Truncating write: {} of {} bytes fit", n, data.len());
        }
        self.buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }

    pub fn to_string_as(&self, encoding: Encoding) -> String {
        encoding.decode(&self.buf)
    }

    /// Owned copy of `[start, end)`. `end` defaults to the length; both ends
    /// clamp to the length and an inverted range is empty.
    pub fn slice(&self, start: usize, end: Option<usize>) -> ByteBuffer {
        let len = self.buf.len();
        let end = end.unwrap_or(len).min(len);
        let start = start.min(end);
        if start == end && len > 0 {
            debug!("Empty slice [{}, {}) of {} byte buffer", start, end, len);
        }
        Self::from_bytes(&self.buf[start..end])
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, BufferError> {
        self.bounds_check(offset)?;
        Ok(self.buf[offset])
    }

    /// Store the low 8 bits of `value` at `offset`
    pub fn set(&mut self, value: i64, offset: usize) -> Result<(), BufferError> {
        self.bounds_check(offset)?;
        self.buf[offset] = low_byte(value);
        Ok(())
    }

    /// Convert a signed offset into an index, rejecting negative values and
    /// anything at or past the end.
    pub fn checked_offset(&self, offset: i64) -> Result<usize, BufferError> {
        let index = usize::try_from(offset).map_err(|_| self.out_of_bounds(offset))?;
        self.bounds_check(index)?;
        Ok(index)
    }

    fn bounds_check(&self, offset: usize) -> Result<(), BufferError> {
        if offset >= self.buf.len() {
            return Err(self.out_of_bounds(i64::try_from(offset).unwrap_or(i64::MAX)));
        }
        Ok(())
    }

    fn out_of_bounds(&self, offset: i64) -> BufferError {
        debug!("Offset {} out of bounds for {} byte buffer", offset, self.buf.len());
        BufferError::OutOfBounds {
            offset,
            len: self.buf.len(),
        }
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_as(Encoding::Utf8))
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            buf: bytes.into_boxed_slice(),
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&str> for ByteBuffer {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl From<String> for ByteBuffer {
    fn from(text: String) -> Self {
        Self::from(text.into_bytes())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}
