//! Text decoding with a GBK fallback.

use encoding_rs::GBK;
use std::fmt;
use std::path::Path;
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding a source file was successfully decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Gbk,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceEncoding::Utf8 => write!(f, "utf-8"),
            SourceEncoding::Gbk => write!(f, "gbk"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: SourceEncoding,
}

/// Why a file was left out of the document.
#[derive(Debug, Error)]
pub enum ReadFailure {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("not valid UTF-8 or GBK")]
    Undecodable,
}

/// Read `path` and decode it as UTF-8, falling back to GBK.
pub fn read_source(path: &Path) -> Result<DecodedText, ReadFailure> {
    let bytes = std::fs::read(path)?;
    decode_bytes(&bytes).ok_or(ReadFailure::Undecodable)
}

/// Strict decode: no replacement characters are ever produced.
pub fn decode_bytes(bytes: &[u8]) -> Option<DecodedText> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return Some(DecodedText {
            text: text.to_string(),
            encoding: SourceEncoding::Utf8,
        });
    }

    GBK.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| DecodedText {
            text: text.into_owned(),
            encoding: SourceEncoding::Gbk,
        })
}
