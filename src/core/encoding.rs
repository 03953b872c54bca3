//! Two-stage text decoding for source files.
//!
//! Sources are tried as UTF-8 first, then as GBK, the legacy encoding of the
//! older parts of the code base. The encoding that succeeded is kept so the
//! file can be written back unchanged apart from the rewritten references.

use encoding_rs::GBK;

/// Encoding a source file was successfully decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Gbk,
}

impl TextEncoding {
    /// Encode `text` back into bytes of this encoding.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Gbk => {
                let (bytes, _, _) = GBK.encode(text);
                bytes.into_owned()
            }
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Gbk => write!(f, "GBK"),
        }
    }
}

/// Outcome of a two-stage decode attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    Decoded { text: String, encoding: TextEncoding },
    /// Neither encoding accepts the bytes.
    Undecodable,
}

pub fn decode(bytes: &[u8]) -> DecodeResult {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodeResult::Decoded {
            text: text.to_string(),
            encoding: TextEncoding::Utf8,
        };
    }

    match GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => DecodeResult::Decoded {
            text: text.into_owned(),
            encoding: TextEncoding::Gbk,
        },
        None => DecodeResult::Undecodable,
    }
}

/// Decode for read-only scanning, where a malformed byte must not hide the
/// references around it.
pub fn decode_lossy(bytes: &[u8]) -> String {
    match decode(bytes) {
        DecodeResult::Decoded { text, .. } => text,
        DecodeResult::Undecodable => String::from_utf8_lossy(bytes).into_owned(),
    }
}
