use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    InvalidInput(String),
    UnsupportedEncoding(String),
    InvalidEncoding(String),
    OutOfBounds { offset: i64, len: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidInput(what) =>
                write!(f, "invalid buffer input: {}", what),
            BufferError::UnsupportedEncoding(name) =>
                write!(f, "unsupported encoding '{}'", name),
            BufferError::InvalidEncoding(reason) =>
                write!(f, "invalid encoded string: {}", reason),
            BufferError::OutOfBounds { offset, len } =>
                write!(f, "offset {} is out of bounds for buffer of length {}", offset, len),
        }
    }
}

impl std::error::Error for BufferError {}
