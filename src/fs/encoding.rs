//! Text decoding.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::steps::{ActionErrorKind, StepActionError};

/// Named encoding used to turn file bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8; invalid sequences are an error.
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// 7-bit ASCII; any byte above 0x7f is an error.
    Ascii,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    #[serde(alias = "binary")]
    Latin1,
    /// Lowercase hexadecimal rendering of the bytes.
    Hex,
}

impl Encoding {
    /// Decode bytes to text.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, StepActionError> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                StepActionError::new(
                    ActionErrorKind::Decode,
                    format!("invalid utf8 at byte {}", e.utf8_error().valid_up_to()),
                )
            }),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(StepActionError::new(
                    ActionErrorKind::Decode,
                    format!("non-ascii byte 0x{:02x} at {}", bytes[pos], pos),
                )),
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Encoding::Hex => Ok(hex::encode(bytes)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Encoding::Utf8 => "utf8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
            Encoding::Hex => "hex",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "latin1" | "binary" => Ok(Self::Latin1),
            "hex" => Ok(Self::Hex),
            _ => Err(format!("unknown encoding: {}", s)),
        }
    }
}
