//! # serde_scsv
//!
//! A codec for Strict CSV (SCSV), a CSV dialect with exactly one way to write
//! every table, so that documents round-trip without loss.
//!
//! ## What is SCSV?
//!
//! SCSV is plain CSV with the ambiguity removed:
//!
//! - **Always quoted**: every non-null value is wrapped in double quotes
//! - **Real nulls**: a null is nothing at all between two commas, distinct from `""`
//! - **One line break**: line breaks inside values are stored as a single carriage
//!   return, since `\n` only ever separates rows
//! - **Compact**: one header row, rectangular data rows, no trailing blank line
//! - **Unicode only**: UTF-8 (with or without signature), UTF-16 and UTF-32 in
//!   both byte orders
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_scsv = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Documents
//!
//! ```rust
//! use serde_scsv::{parse, serialize, Encoding};
//!
//! let header = vec![Some("Value Type".to_string()), Some("Example".to_string())];
//! let rows = vec![vec![Some("Normal".to_string()), Some("something or another".to_string())]];
//!
//! let bytes = serialize(&header, &rows, Encoding::Utf8).unwrap();
//! assert_eq!(bytes, b"\"Value Type\",\"Example\"\n\"Normal\",\"something or another\"");
//!
//! let doc = parse(std::str::from_utf8(&bytes).unwrap()).unwrap();
//! assert_eq!(doc.header(), header.as_slice());
//! assert_eq!(doc.rows(), rows.as_slice());
//! ```
//!
//! ### Typed Records
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_scsv::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Quote {
//!     author: String,
//!     text: String,
//!     year: Option<u16>,
//! }
//!
//! let quotes = vec![Quote {
//!     author: "Walt Disney".to_string(),
//!     text: "\"The way to get started is to quit talking and begin doing\"".to_string(),
//!     year: None,
//! }];
//!
//! let scsv = to_string(&quotes).unwrap();
//! let back: Vec<Quote> = from_str(&scsv).unwrap();
//! assert_eq!(quotes, back);
//! ```
//!
//! ## Errors
//!
//! Parsing and serialization are all-or-nothing. Malformed input is never
//! repaired: short rows are not padded and unquoted values are not accepted.
//! I/O failures are returned as [`Error::Io`] with the original error inside.
//!
//! ## Format Specification
//!
//! See the [`spec`] module for the SCSV v0.1.0 wire format.

pub mod de;
pub mod document;
pub mod encoding;
pub mod error;
pub mod options;
mod row;
pub mod ser;
pub mod spec;

pub use de::Parser;
pub use document::Document;
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use options::{LineBreak, ScsvOptions};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Parses SCSV text into a [`Document`].
///
/// # Examples
///
/// ```rust
/// use serde_scsv::parse;
///
/// let doc = parse("\"Value Type\",\"Example\"\n\"Null\",").unwrap();
/// assert_eq!(doc.get(0, 0), Some("Null"));
/// assert_eq!(doc.cell(0, 1), Some(None));
/// ```
///
/// # Errors
///
/// Returns an error if a row is not in compact form, holds an unquoted value,
/// or is not as wide as the header.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<Document> {
    parse_with_options(text, &ScsvOptions::default())
}

/// Parses SCSV text into a [`Document`] with custom options.
///
/// # Errors
///
/// Same as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(text: &str, options: &ScsvOptions) -> Result<Document> {
    Parser::from_str(text)
        .with_line_break(options.line_break)
        .parse_document()
}

/// Parses SCSV bytes, detecting the encoding from the signature.
///
/// Bytes without a signature are read as UTF-8.
///
/// # Examples
///
/// ```rust
/// use serde_scsv::{parse_slice, Encoding};
///
/// let bytes = Encoding::Utf32LittleEndian.encode_with_signature("\"a\"\n\"1\"");
/// let doc = parse_slice(&bytes).unwrap();
/// assert_eq!(doc.get(0, 0), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedEncoding`] if the bytes are not text in one of
/// the supported encodings, or any error [`parse`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(bytes: &[u8]) -> Result<Document> {
    parse_slice_with_options(bytes, &ScsvOptions::default())
}

/// Parses SCSV bytes with custom options, detecting the encoding from the signature.
///
/// The encoding in `options` is ignored; the signature decides it. It is read
/// by the `*_with_options` writers such as [`serialize_with_options`].
///
/// # Errors
///
/// Same as [`parse_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice_with_options(bytes: &[u8], options: &ScsvOptions) -> Result<Document> {
    let (text, encoding) = Encoding::detect_and_decode(bytes)?;
    debug!("decoded {} bytes as {}", bytes.len(), encoding);
    parse_with_options(&text, options)
}

/// Reads and parses an SCSV file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any error
/// [`parse_slice`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, &ScsvOptions::default())
}

/// Reads and parses an SCSV file with custom options.
///
/// # Errors
///
/// Same as [`parse_file`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ScsvOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    parse_slice_with_options(&bytes, options)
}

/// Serializes a header and its rows into SCSV bytes in `encoding`.
///
/// The signature of `encoding`, if any, is written first.
///
/// # Examples
///
/// ```rust
/// use serde_scsv::{serialize, Encoding};
///
/// let header = vec![Some("Value Type".to_string()), Some("Example".to_string())];
/// let rows = vec![vec![Some("Null".to_string()), None]];
///
/// let bytes = serialize(&header, &rows, Encoding::Utf8WithBom).unwrap();
/// assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
/// assert_eq!(&bytes[3..], b"\"Value Type\",\"Example\"\n\"Null\",");
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyHeader`] if `header` is empty, or
/// [`Error::RaggedValues`] if a row is not as wide as the header.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(
    header: &[Option<String>],
    rows: &[Vec<Option<String>>],
    encoding: Encoding,
) -> Result<Vec<u8>> {
    let text = serialize_to_string(header, rows)?;
    Ok(encoding.encode_with_signature(&text))
}

/// Serializes a header and its rows into SCSV text.
///
/// # Errors
///
/// Same as [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_to_string(
    header: &[Option<String>],
    rows: &[Vec<Option<String>>],
) -> Result<String> {
    document::validate_shape(header, rows)?;
    Ok(ser::write_document(header, rows))
}

/// Serializes a header and its rows and writes them to `path`, replacing any
/// existing file.
///
/// # Errors
///
/// Returns the errors of [`serialize`], or [`Error::Io`] if the file cannot
/// be written. Nothing is written when serialization fails.
pub fn serialize_file<P: AsRef<Path>>(
    path: P,
    header: &[Option<String>],
    rows: &[Vec<Option<String>>],
    encoding: Encoding,
) -> Result<()> {
    let bytes = serialize(header, rows, encoding)?;
    write_bytes(path.as_ref(), &bytes, encoding)
}

/// Serializes a header and its rows into SCSV bytes in the encoding chosen by
/// `options`.
///
/// # Examples
///
/// ```rust
/// use serde_scsv::{serialize_with_options, Encoding, ScsvOptions};
///
/// let header = vec![Some("a".to_string())];
/// let options = ScsvOptions::new().with_encoding(Encoding::Utf16BigEndian);
/// let bytes = serialize_with_options(&header, &[], &options).unwrap();
/// assert_eq!(bytes, [0xFE, 0xFF, 0x00, b'"', 0x00, b'a', 0x00, b'"']);
/// ```
///
/// # Errors
///
/// Same as [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options(
    header: &[Option<String>],
    rows: &[Vec<Option<String>>],
    options: &ScsvOptions,
) -> Result<Vec<u8>> {
    serialize(header, rows, options.encoding)
}

/// Serializes a header and its rows to `path` in the encoding chosen by
/// `options`, replacing any existing file.
///
/// # Errors
///
/// Same as [`serialize_file`].
pub fn serialize_file_with_options<P: AsRef<Path>>(
    path: P,
    header: &[Option<String>],
    rows: &[Vec<Option<String>>],
    options: &ScsvOptions,
) -> Result<()> {
    serialize_file(path, header, rows, options.encoding)
}

/// Deserializes every data row of an SCSV string into a `T`.
///
/// Rows are read as records keyed by header label; `Option` fields receive
/// nulls, and numbers, booleans and unit enum variants are parsed from text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_scsv::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let points: Vec<Point> = from_str("\"x\",\"y\"\n\"1\",\"2\"").unwrap();
/// assert_eq!(points, vec![Point { x: 1, y: 2 }]);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid SCSV or a row cannot be
/// deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let document = parse(s)?;
    de::document_to_records(&document)
}

/// Deserializes every data row of a parsed [`Document`] into a `T`.
///
/// Records may borrow string data from the document.
///
/// # Errors
///
/// Returns an error if a row cannot be deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<'a, T>(document: &'a Document) -> Result<Vec<T>>
where
    T: Deserialize<'a>,
{
    de::document_to_records(document)
}

/// Deserializes every data row of SCSV bytes into a `T`, detecting the encoding.
///
/// # Errors
///
/// Returns an error if the bytes are not SCSV in a supported encoding, or a row
/// cannot be deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(bytes: &[u8]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let document = parse_slice(bytes)?;
    de::document_to_records(&document)
}

/// Deserializes every data row from an I/O stream of SCSV bytes.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_scsv::from_reader;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b"\"x\",\"y\"\n\"1\",\"2\"");
/// let points: Vec<Point> = from_reader(cursor).unwrap();
/// assert_eq!(points, vec![Point { x: 1, y: 2 }]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or any error [`from_slice`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<Vec<T>>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_slice(&bytes)
}

/// Reads an SCSV file and deserializes every data row into a `T`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any error
/// [`from_slice`] can return.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<P, T>(path: P) -> Result<Vec<T>>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let document = parse_file(path)?;
    de::document_to_records(&document)
}

/// Serializes records into a [`Document`].
///
/// The header is made of the first record's field names; every record must
/// be a struct or a map producing the same names.
///
/// # Errors
///
/// Returns [`Error::EmptyHeader`] if `records` is empty, or an error if a
/// record is not a flat struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(records: &[T]) -> Result<Document>
where
    T: Serialize,
{
    ser::records_to_document(records)
}

/// Serializes records into SCSV text.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_scsv::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let scsv = to_string(&[Point { x: 1, y: 2 }]).unwrap();
/// assert_eq!(scsv, "\"x\",\"y\"\n\"1\",\"2\"");
/// ```
///
/// # Errors
///
/// Same as [`to_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(records: &[T]) -> Result<String>
where
    T: Serialize,
{
    Ok(to_document(records)?.to_scsv_string())
}

/// Serializes records into SCSV bytes in `encoding`, signature included.
///
/// # Errors
///
/// Same as [`to_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(records: &[T], encoding: Encoding) -> Result<Vec<u8>>
where
    T: Serialize,
{
    Ok(to_document(records)?.to_bytes(encoding))
}

/// Serializes records into a writer as SCSV bytes in `encoding`.
///
/// # Errors
///
/// Returns the errors of [`to_document`], or [`Error::Io`] if writing fails.
pub fn to_writer<W, T>(mut writer: W, records: &[T], encoding: Encoding) -> Result<()>
where
    W: io::Write,
    T: Serialize,
{
    let bytes = to_vec(records, encoding)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Serializes records and writes them to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns the errors of [`to_document`], or [`Error::Io`] if the file cannot
/// be written.
pub fn to_file<P, T>(path: P, records: &[T], encoding: Encoding) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let bytes = to_vec(records, encoding)?;
    write_bytes(path.as_ref(), &bytes, encoding)
}

/// Serializes typed records into SCSV bytes in the encoding chosen by `options`.
///
/// # Errors
///
/// Same as [`to_vec`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options<T>(records: &[T], options: &ScsvOptions) -> Result<Vec<u8>>
where
    T: Serialize,
{
    to_vec(records, options.encoding)
}

/// Serializes typed records to a writer in the encoding chosen by `options`.
///
/// # Errors
///
/// Same as [`to_writer`].
pub fn to_writer_with_options<W, T>(
    writer: W,
    records: &[T],
    options: &ScsvOptions,
) -> Result<()>
where
    W: io::Write,
    T: Serialize,
{
    to_writer(writer, records, options.encoding)
}

/// Serializes typed records to `path` in the encoding chosen by `options`.
///
/// # Errors
///
/// Same as [`to_file`].
pub fn to_file_with_options<P, T>(path: P, records: &[T], options: &ScsvOptions) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    to_file(path, records, options.encoding)
}

fn write_bytes(path: &Path, bytes: &[u8], encoding: Encoding) -> Result<()> {
    fs::write(path, bytes)?;
    debug!(
        "wrote {} bytes of {} SCSV to {}",
        bytes.len(),
        encoding,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        email: Option<String>,
    }

    fn text(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let points = vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }];
        let scsv = to_string(&points).unwrap();
        let points_back: Vec<Point> = from_str(&scsv).unwrap();
        assert_eq!(points, points_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let users = vec![
            User {
                id: 123,
                name: "Alice, \"Al\"".to_string(),
                active: true,
                email: None,
            },
            User {
                id: 124,
                name: "Bob\nBuilder".to_string(),
                active: false,
                email: Some(String::new()),
            },
        ];

        for encoding in Encoding::ALL {
            let bytes = to_vec(&users, encoding).unwrap();
            let users_back: Vec<User> = from_slice(&bytes).unwrap();
            assert_eq!(users, users_back, "{encoding}");
        }
    }

    #[test]
    fn test_serialize_rejects_empty_header() {
        assert!(matches!(
            serialize(&[], &[], Encoding::Utf8),
            Err(Error::EmptyHeader)
        ));
    }

    #[test]
    fn test_serialize_rejects_ragged_rows() {
        let header = vec![text("a"), text("b")];
        let rows = vec![vec![text("1"), None], vec![text("2")]];
        assert!(matches!(
            serialize(&header, &rows, Encoding::Utf8),
            Err(Error::RaggedValues {
                row: 2,
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_parse_with_crlf_line_break() {
        let options = ScsvOptions::new().with_line_break(LineBreak::CrLf);
        let doc = parse_with_options("\"m\"\n\"a\rb\"", &options).unwrap();
        assert_eq!(doc.get(0, 0), Some("a\r\nb"));
    }

    #[test]
    fn test_from_reader_propagates_io_errors() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }
        let result: Result<Vec<Point>> = from_reader(Broken);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &[Point { x: 1, y: 2 }], Encoding::Utf16LittleEndian).unwrap();
        assert_eq!(&buffer[..2], &[0xFF, 0xFE]);
        let points: Vec<Point> = from_slice(&buffer).unwrap();
        assert_eq!(points, vec![Point { x: 1, y: 2 }]);
    }

    #[test]
    fn test_writers_use_options_encoding() {
        let options = ScsvOptions::new().with_encoding(Encoding::Utf16LittleEndian);
        let points = [Point { x: 1, y: 2 }];

        let bytes = to_vec_with_options(&points, &options).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        assert_eq!(
            bytes,
            Encoding::Utf16LittleEndian.encode_with_signature("\"x\",\"y\"\n\"1\",\"2\"")
        );

        let mut buffer = Vec::new();
        to_writer_with_options(&mut buffer, &points, &options).unwrap();
        assert_eq!(buffer, bytes);

        let header = vec![Some("x".to_string()), Some("y".to_string())];
        let rows = vec![vec![Some("1".to_string()), Some("2".to_string())]];
        assert_eq!(serialize_with_options(&header, &rows, &options).unwrap(), bytes);
    }

    #[test]
    fn test_default_options_write_plain_utf8() {
        let header = vec![Some("a".to_string())];
        let bytes = serialize_with_options(&header, &[], &ScsvOptions::default()).unwrap();
        assert_eq!(bytes, b"\"a\"");
    }
}
