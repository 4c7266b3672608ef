//! Fixed-capacity byte buffers with UTF-8 and hex text conversions.

pub mod buffer;
pub mod config;
pub mod encoding;
pub mod error;

pub use buffer::{BufferInput, ByteBuffer};
pub use encoding::Encoding;
pub use error::BufferError;
