// 🔤 Text Encoding - declared source encoding of bank data files
//
// Bank data files have historically shipped as ISO-8859-15. Whatever the
// source encoding, every string handed to callers is UTF-8.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding of every string returned by this library.
pub const OUTPUT_ENCODING: &str = "UTF-8";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    Utf8,

    /// ISO-8859-1: every byte is the code point of the same value
    Latin1,

    /// ISO-8859-15: Latin-1 with eight replaced positions (€, Š, š, Ž, ž, Œ, œ, Ÿ)
    Latin9,
}

impl TextEncoding {
    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "ISO-8859-1",
            TextEncoding::Latin9 => "ISO-8859-15",
        }
    }

    /// Decode raw bytes from a data file into a UTF-8 string.
    ///
    /// Never fails: invalid UTF-8 sequences become U+FFFD, and the single-byte
    /// encodings map every byte to exactly one character.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            TextEncoding::Latin9 => bytes.iter().map(|&b| latin9_char(b)).collect(),
        }
    }
}

fn latin9_char(byte: u8) -> char {
    match byte {
        0xA4 => '€',
        0xA6 => 'Š',
        0xA8 => 'š',
        0xB4 => 'Ž',
        0xB8 => 'ž',
        0xBC => 'Œ',
        0xBD => 'œ',
        0xBE => 'Ÿ',
        other => char::from(other),
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(TextEncoding::Latin1),
            "iso-8859-15" | "iso8859-15" | "latin9" | "latin-9" => Ok(TextEncoding::Latin9),
            _ => Err(ConfigError::UnknownEncoding(s.to_string())),
        }
    }
}
