use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::Serialize;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Byte values that Windows-1252 leaves unassigned. `encoding_rs` follows
/// WHATWG and maps them to C1 controls, so they are rejected up front.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// A text encoding the reader may try, in the order the caller lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandidateEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value.
    #[serde(rename = "latin-1")]
    Latin1,
    #[serde(rename = "cp1252")]
    Windows1252,
}

impl CandidateEncoding {
    /// The fallback order used when the caller does not supply one.
    pub const DEFAULT_ORDER: [CandidateEncoding; 3] = [
        CandidateEncoding::Utf8,
        CandidateEncoding::Latin1,
        CandidateEncoding::Windows1252,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CandidateEncoding::Utf8 => "utf-8",
            CandidateEncoding::Latin1 => "latin-1",
            CandidateEncoding::Windows1252 => "cp1252",
        }
    }

    /// Strictly decode `bytes`. Returns `None` when the input is not valid
    /// in this encoding; nothing is ever replaced with U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            CandidateEncoding::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|cow| cow.into_owned()),
            CandidateEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            CandidateEncoding::Windows1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|cow| cow.into_owned())
            }
        }
    }
}

impl fmt::Display for CandidateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown encoding `{0}` (expected utf-8, latin-1 or cp1252)")]
pub struct UnknownEncoding(pub String);

impl FromStr for CandidateEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(CandidateEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => {
                Ok(CandidateEncoding::Latin1)
            }
            "cp1252" | "windows-1252" | "win1252" => Ok(CandidateEncoding::Windows1252),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}
