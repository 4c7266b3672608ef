use crate::error::BufferError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Text encodings a buffer can be built from or rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "hex")]
    Hex,
}

impl Encoding {
    /// Turn `text` into the bytes it names under this encoding
    pub fn encode(self, text: &str) -> Result<Vec<u8>, BufferError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Hex => from_hex(text),
        }
    }

    /// Render `bytes` as text. UTF-8 decoding is lossy: invalid sequences
    /// become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Hex => to_hex(bytes),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Hex => "hex",
        }
    }
}

impl FromStr for Encoding {
    type Err = BufferError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "hex" => Ok(Encoding::Hex),
            other => {
                debug!("Rejecting encoding name '{}'", other);
                Err(BufferError::UnsupportedEncoding(other.to_string()))
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode pairs of hex digits (either case) into bytes
pub fn from_hex(text: &str) -> Result<Vec<u8>, BufferError> {
    if text.len() % 2 != 0 {
        debug!("Hex string has odd length: {}", text.len());
        return Err(BufferError::InvalidEncoding(format!(
            "hex string has odd length {}",
            text.len()
        )));
    }

    hex::decode(text).map_err(|e| {
        debug!("Hex decode failed: {}", e);
        BufferError::InvalidEncoding(e.to_string())
    })
}

/// Two lowercase, zero-padded digits per byte
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
