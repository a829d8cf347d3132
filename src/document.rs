//! In-memory representation of an SCSV document.
//!
//! A [`Document`] is a header row plus a rectangular grid of nullable strings.
//! Every row has exactly as many values as the header has labels; documents
//! built through [`Document::new`] or returned by the parser always hold
//! this invariant.
//!
//! ## Examples
//!
//! ```rust
//! use serde_scsv::{Document, Encoding};
//!
//! let doc = Document::new(
//!     vec![Some("Value Type".to_string()), Some("Example".to_string())],
//!     vec![vec![Some("Null".to_string()), None]],
//! )
//! .unwrap();
//!
//! assert_eq!(doc.width(), 2);
//! assert_eq!(doc.len(), 1);
//! assert_eq!(doc.cell(0, 1), Some(None));
//! assert_eq!(doc.to_bytes(Encoding::Utf8), b"\"Value Type\",\"Example\"\n\"Null\",");
//! ```

use crate::{ser, Encoding, Error, Result};

/// A parsed or to-be-serialized SCSV document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    header: Vec<Option<String>>,
    rows: Vec<Vec<Option<String>>>,
}

impl Document {
    /// Creates a document, checking that the header is not empty and that
    /// every row is as wide as the header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHeader`] or [`Error::RaggedValues`].
    pub fn new(header: Vec<Option<String>>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        validate_shape(&header, &rows)?;
        Ok(Document { header, rows })
    }

    /// Builds a document whose shape the caller has already checked.
    pub(crate) fn from_parts_unchecked(
        header: Vec<Option<String>>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == header.len()));
        Document { header, rows }
    }

    /// The header labels. A label may be null.
    #[must_use]
    pub fn header(&self) -> &[Option<String>] {
        &self.header
    }

    /// All data rows, excluding the header.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// The data row at `index`, if any.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Option<String>]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// The value at (`row`, `column`): `None` when out of range, `Some(None)` for null.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<Option<&str>> {
        self.rows
            .get(row)
            .and_then(|values| values.get(column))
            .map(Option::as_deref)
    }

    /// The string at (`row`, `column`), or `None` when the value is null or out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.cell(row, column).flatten()
    }

    /// Position of the first column labelled `label`.
    #[must_use]
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|candidate| candidate.as_deref() == Some(label))
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when the document has a header but no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the document, returning the header and the rows.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Option<String>>, Vec<Vec<Option<String>>>) {
        (self.header, self.rows)
    }

    /// Writes the document as SCSV text, without any signature.
    #[must_use]
    pub fn to_scsv_string(&self) -> String {
        ser::write_document(&self.header, &self.rows)
    }

    /// Writes the document as SCSV bytes in `encoding`, signature included.
    #[must_use]
    pub fn to_bytes(&self, encoding: Encoding) -> Vec<u8> {
        encoding.encode_with_signature(&self.to_scsv_string())
    }
}

pub(crate) fn validate_shape(
    header: &[Option<String>],
    rows: &[Vec<Option<String>>],
) -> Result<()> {
    if header.is_empty() {
        return Err(Error::EmptyHeader);
    }
    for (index, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(Error::ragged_values(index + 1, row.len(), header.len()));
        }
    }
    Ok(())
}
