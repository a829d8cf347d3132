//! Text encodings supported by SCSV.
//!
//! A document is always stored as Unicode text in one of six encodings. The
//! [`Encoding`] selector maps each of them to its codec and to the signature
//! (byte order mark) written in front of the text.
//!
//! | Variant | Signature |
//! |---------|-----------|
//! | `Utf8` | (none) |
//! | `Utf8WithBom` | `EF BB BF` |
//! | `Utf16BigEndian` | `FE FF` |
//! | `Utf16LittleEndian` | `FF FE` |
//! | `Utf32BigEndian` | `00 00 FE FF` |
//! | `Utf32LittleEndian` | `FF FE 00 00` |
//!
//! ## Examples
//!
//! ```rust
//! use serde_scsv::Encoding;
//!
//! let bytes = Encoding::Utf16BigEndian.encode_with_signature("\"a\"");
//! assert_eq!(bytes, [0xFE, 0xFF, 0x00, b'"', 0x00, b'a', 0x00, b'"']);
//!
//! let (text, detected) = Encoding::detect_and_decode(&bytes).unwrap();
//! assert_eq!(text, "\"a\"");
//! assert_eq!(detected, Encoding::Utf16BigEndian);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const UTF8_SIGNATURE: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_BE_SIGNATURE: &[u8] = &[0xFE, 0xFF];
const UTF16_LE_SIGNATURE: &[u8] = &[0xFF, 0xFE];
const UTF32_BE_SIGNATURE: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];
const UTF32_LE_SIGNATURE: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];

/// Encoding selector for SCSV bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    #[default]
    Utf8,
    Utf8WithBom,
    Utf16BigEndian,
    Utf16LittleEndian,
    Utf32BigEndian,
    Utf32LittleEndian,
}

impl Encoding {
    /// All supported encodings, in declaration order.
    pub const ALL: [Encoding; 6] = [
        Encoding::Utf8,
        Encoding::Utf8WithBom,
        Encoding::Utf16BigEndian,
        Encoding::Utf16LittleEndian,
        Encoding::Utf32BigEndian,
        Encoding::Utf32LittleEndian,
    ];

    /// Returns the signature bytes written before the text. Empty for plain UTF-8.
    #[must_use]
    pub const fn signature(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[],
            Encoding::Utf8WithBom => UTF8_SIGNATURE,
            Encoding::Utf16BigEndian => UTF16_BE_SIGNATURE,
            Encoding::Utf16LittleEndian => UTF16_LE_SIGNATURE,
            Encoding::Utf32BigEndian => UTF32_BE_SIGNATURE,
            Encoding::Utf32LittleEndian => UTF32_LE_SIGNATURE,
        }
    }

    /// Encodes `text` without any signature.
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 | Encoding::Utf8WithBom => text.as_bytes().to_vec(),
            Encoding::Utf16BigEndian => encode_utf16(text, true),
            Encoding::Utf16LittleEndian => encode_utf16(text, false),
            Encoding::Utf32BigEndian => encode_utf32(text, true),
            Encoding::Utf32LittleEndian => encode_utf32(text, false),
        }
    }

    /// Encodes `text` and prepends this encoding's signature.
    #[must_use]
    pub fn encode_with_signature(&self, text: &str) -> Vec<u8> {
        let signature = self.signature();
        let mut out = Vec::with_capacity(signature.len() + text.len() * self.unit_width());
        out.extend_from_slice(signature);
        out.extend_from_slice(&self.encode(text));
        out
    }

    /// Decodes `bytes` as this encoding, skipping the signature if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if the bytes are not valid text in
    /// this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let body = bytes.strip_prefix(self.signature()).unwrap_or(bytes);
        match self {
            // a signature in front of plain UTF-8 is tolerated
            Encoding::Utf8 => decode_utf8(body.strip_prefix(UTF8_SIGNATURE).unwrap_or(body)),
            Encoding::Utf8WithBom => decode_utf8(body),
            Encoding::Utf16BigEndian => decode_utf16(body, true),
            Encoding::Utf16LittleEndian => decode_utf16(body, false),
            Encoding::Utf32BigEndian => decode_utf32(body, true),
            Encoding::Utf32LittleEndian => decode_utf32(body, false),
        }
    }

    /// Detects the encoding of `bytes` from its signature.
    ///
    /// Bytes without a recognised signature are taken as plain UTF-8. The
    /// UTF-32 little endian signature starts with the UTF-16 little endian one,
    /// so longer signatures are matched first.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Encoding {
        if bytes.starts_with(UTF32_LE_SIGNATURE) {
            Encoding::Utf32LittleEndian
        } else if bytes.starts_with(UTF32_BE_SIGNATURE) {
            Encoding::Utf32BigEndian
        } else if bytes.starts_with(UTF8_SIGNATURE) {
            Encoding::Utf8WithBom
        } else if bytes.starts_with(UTF16_LE_SIGNATURE) {
            Encoding::Utf16LittleEndian
        } else if bytes.starts_with(UTF16_BE_SIGNATURE) {
            Encoding::Utf16BigEndian
        } else {
            Encoding::Utf8
        }
    }

    /// Detects the encoding of `bytes` and decodes them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if the bytes do not decode under
    /// the detected encoding.
    pub fn detect_and_decode(bytes: &[u8]) -> Result<(String, Encoding)> {
        let encoding = Encoding::detect(bytes);
        let text = encoding.decode(bytes)?;
        Ok((text, encoding))
    }

    const fn unit_width(&self) -> usize {
        match self {
            Encoding::Utf8 | Encoding::Utf8WithBom => 1,
            Encoding::Utf16BigEndian | Encoding::Utf16LittleEndian => 2,
            Encoding::Utf32BigEndian | Encoding::Utf32LittleEndian => 4,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8WithBom => "utf-8-with-bom",
            Encoding::Utf16BigEndian => "utf-16-big-endian",
            Encoding::Utf16LittleEndian => "utf-16-little-endian",
            Encoding::Utf32BigEndian => "utf-32-big-endian",
            Encoding::Utf32LittleEndian => "utf-32-little-endian",
        })
    }
}

impl FromStr for Encoding {
    type Err = Error;

    /// Accepts the [`Display`](fmt::Display) names plus the common short
    /// labels (`utf8`, `utf8bom`, `utf16be`, `utf16le`, `utf32be`, `utf32le`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Ok(Encoding::Utf8),
            "utf8withbom" | "utf8bom" | "utf8sig" => Ok(Encoding::Utf8WithBom),
            "utf16bigendian" | "utf16be" => Ok(Encoding::Utf16BigEndian),
            "utf16littleendian" | "utf16le" => Ok(Encoding::Utf16LittleEndian),
            "utf32bigendian" | "utf32be" => Ok(Encoding::Utf32BigEndian),
            "utf32littleendian" | "utf32le" => Ok(Encoding::Utf32LittleEndian),
            _ => Err(Error::UnsupportedEncoding),
        }
    }
}

fn encode_utf16(text: &str, big_endian: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        let bytes = if big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        };
        out.extend_from_slice(&bytes);
    }
    out
}

fn encode_utf32(text: &str, big_endian: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 4);
    for ch in text.chars() {
        let cp = ch as u32;
        let bytes = if big_endian {
            cp.to_be_bytes()
        } else {
            cp.to_le_bytes()
        };
        out.extend_from_slice(&bytes);
    }
    out
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| Error::UnsupportedEncoding)
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> Result<String> {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(Error::UnsupportedEncoding);
    }
    let units = chunks.map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|_| Error::UnsupportedEncoding)
}

fn decode_utf32(bytes: &[u8], big_endian: bool) -> Result<String> {
    let chunks = bytes.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err(Error::UnsupportedEncoding);
    }
    chunks
        .map(|quad| {
            let quad = [quad[0], quad[1], quad[2], quad[3]];
            let cp = if big_endian {
                u32::from_be_bytes(quad)
            } else {
                u32::from_le_bytes(quad)
            };
            char::from_u32(cp).ok_or(Error::UnsupportedEncoding)
        })
        .collect()
}
