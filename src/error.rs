//! Error types for SCSV parsing and serialization.
//!
//! Every fallible operation in this crate returns [`Error`]. Parsing and
//! serialization are all-or-nothing: on error no partial document is produced.
//!
//! ## Error Categories
//!
//! - **Encoding errors**: the input bytes are not in one of the six supported encodings
//! - **Format errors**: a row is not in compact form or a value is not quoted
//! - **Shape errors**: a row's width disagrees with the header, or the header is empty
//! - **I/O errors**: file reading/writing failures, passed through untouched
//! - **Record errors**: a typed record could not be built from, or turned into, a row
//!
//! ## Examples
//!
//! ```rust
//! use serde_scsv::{parse, Error};
//!
//! let result = parse("\"a\",\"b\"\n\"1\"");
//! assert!(matches!(result, Err(Error::RowLength { row: 1, found: 1, expected: 2 })));
//!
//! if let Err(err) = result {
//!     assert_eq!(err.to_string(), "1st row length (1) didn't match the headers length (2).");
//! }
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing SCSV.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte input is not text in one of the supported encodings.
    #[error("Only UTF-8, UTF-16 (both big and little endian) and UTF-32 (both big and little endian) are supported. UTF-8 is not required to have a BOM.")]
    UnsupportedEncoding,

    /// A non-null field does not start with a double quote.
    #[error("Non-null values must be surrounded by double quotes (line {line}).")]
    NotQuoted { line: usize },

    /// A row is not laid out in compact form: a stray one-character field,
    /// an unterminated quoted value, or no fields at all.
    #[error("Only compact format is supported (line {line}).")]
    NotCompact { line: usize },

    /// A data row has a different number of values than the header.
    ///
    /// `row` is the 1-based index among data rows (the header is not counted).
    #[error("{} row length ({found}) didn't match the headers length ({expected}).", ordinal(*.row))]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Attempted to serialize a document without any header labels.
    #[error("The header must be defined.")]
    EmptyHeader,

    /// Attempted to serialize a grid whose row width disagrees with the header.
    #[error("All rows must have the same number of values as the header ({} row has {found}, header has {expected}).", ordinal(*.row))]
    RaggedValues {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// I/O error from the underlying file system or writer.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Type that cannot be represented as a record or a single field.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error, mostly raised through serde.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a "must be quoted" error for the given 1-based line.
    pub fn not_quoted(line: usize) -> Self {
        Error::NotQuoted { line }
    }

    /// Creates a "not compact format" error for the given 1-based line.
    pub fn not_compact(line: usize) -> Self {
        Error::NotCompact { line }
    }

    /// Creates a row length mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_scsv::Error;
    ///
    /// let err = Error::row_length(2, 3, 2);
    /// assert_eq!(err.to_string(), "2nd row length (3) didn't match the headers length (2).");
    /// ```
    pub fn row_length(row: usize, found: usize, expected: usize) -> Self {
        Error::RowLength {
            row,
            found,
            expected,
        }
    }

    /// Creates an error for a grid row whose width disagrees with the header.
    pub fn ragged_values(row: usize, found: usize, expected: usize) -> Self {
        Error::RaggedValues {
            row,
            found,
            expected,
        }
    }

    /// Creates an unsupported type error for types that cannot become a record or a field.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_scsv::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Formats `value` with its English ordinal suffix (`1st`, `2nd`, `11th`, ...).
pub(crate) fn ordinal(value: usize) -> String {
    let suffix = match value % 100 {
        11..=13 => "th",
        _ => match value % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{value}{suffix}")
}
