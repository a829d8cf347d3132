//! Configuration options for SCSV reading and writing.
//!
//! This module provides types to customize how documents are encoded and how
//! embedded line breaks are restored:
//!
//! - [`ScsvOptions`]: Main configuration struct
//! - [`LineBreak`]: Line break written back into multiline values when parsing
//!
//! ## Examples
//!
//! ```rust
//! use serde_scsv::{parse_with_options, Encoding, LineBreak, ScsvOptions};
//!
//! let options = ScsvOptions::new()
//!     .with_encoding(Encoding::Utf16LittleEndian)
//!     .with_line_break(LineBreak::CrLf);
//!
//! let doc = parse_with_options("\"note\"\n\"first\rsecond\"", &options).unwrap();
//! assert_eq!(doc.get(0, 0), Some("first\r\nsecond"));
//! ```

use crate::{Encoding, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Line break restored inside multiline values.
///
/// On the wire every embedded line break is a single carriage return; this
/// selects what it turns back into.
///
/// # Examples
///
/// ```rust
/// use serde_scsv::LineBreak;
///
/// assert_eq!(LineBreak::Lf.as_str(), "\n");
/// assert_eq!(LineBreak::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreak {
    #[default]
    Lf,
    CrLf,
    /// The convention of the platform the crate was compiled for.
    Native,
}

impl LineBreak {
    /// Returns the string representation of this line break.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::CrLf => "\r\n",
            LineBreak::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

impl fmt::Display for LineBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineBreak::Lf => "lf",
            LineBreak::CrLf => "crlf",
            LineBreak::Native => "native",
        })
    }
}

impl FromStr for LineBreak {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" => Ok(LineBreak::Lf),
            "crlf" => Ok(LineBreak::CrLf),
            "native" => Ok(LineBreak::Native),
            other => Err(Error::custom(format!("unknown line break `{other}`"))),
        }
    }
}

/// Configuration options for SCSV reading and writing.
///
/// # Examples
///
/// ```rust
/// use serde_scsv::{Encoding, LineBreak, ScsvOptions};
///
/// let options = ScsvOptions::new();
/// assert_eq!(options.encoding, Encoding::Utf8);
/// assert_eq!(options.line_break, LineBreak::Lf);
///
/// let options = ScsvOptions::new().with_encoding(Encoding::Utf8WithBom);
/// assert_eq!(options.encoding, Encoding::Utf8WithBom);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScsvOptions {
    /// Target encoding for the `*_with_options` writers, such as
    /// [`to_vec_with_options`](crate::to_vec_with_options).
    pub encoding: Encoding,
    /// Line break restored inside multiline values when reading.
    pub line_break: LineBreak,
}

impl ScsvOptions {
    /// Creates default options (UTF-8 without signature, LF line breaks).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the encoding used when writing.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the line break restored inside multiline values.
    #[must_use]
    pub fn with_line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_break_from_str() {
        assert_eq!("LF".parse::<LineBreak>().unwrap(), LineBreak::Lf);
        assert_eq!("crlf".parse::<LineBreak>().unwrap(), LineBreak::CrLf);
        assert_eq!("native".parse::<LineBreak>().unwrap(), LineBreak::Native);
        assert!("cr".parse::<LineBreak>().is_err());
    }

    #[test]
    fn test_native_matches_platform() {
        let expected = if cfg!(windows) { "\r\n" } else { "\n" };
        assert_eq!(LineBreak::Native.as_str(), expected);
    }

    #[test]
    fn test_builder() {
        let options = ScsvOptions::new()
            .with_encoding(Encoding::Utf32BigEndian)
            .with_line_break(LineBreak::CrLf);
        assert_eq!(options.encoding, Encoding::Utf32BigEndian);
        assert_eq!(options.line_break, LineBreak::CrLf);
    }
}
