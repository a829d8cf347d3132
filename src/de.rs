//! SCSV deserialization.
//!
//! This module provides the [`Parser`] that parses SCSV text into a
//! [`Document`], and the serde plumbing that maps each data row onto a typed
//! record keyed by the header labels.
//!
//! ## Overview
//!
//! - **Row splitting**: rows are separated by `\n`; every row goes through the
//!   quote-aware splitter
//! - **Shape checks**: every data row must be exactly as wide as the header
//! - **All or nothing**: the first malformed row aborts the whole parse
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_scsv::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Sample {
//!     #[serde(rename = "Value Type")]
//!     kind: String,
//!     #[serde(rename = "Example")]
//!     example: Option<String>,
//! }
//!
//! let scsv = "\"Value Type\",\"Example\"\n\"Null\",";
//! let samples: Vec<Sample> = from_str(scsv).unwrap();
//! assert_eq!(samples, vec![Sample { kind: "Null".to_string(), example: None }]);
//! ```

use crate::options::LineBreak;
use crate::row::split_row;
use crate::{Document, Error, Result};
use log::trace;
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::iter::Zip;
use std::slice;

/// The SCSV document parser.
///
/// Created via [`Parser::from_str`]. This is not a [`serde::Deserializer`];
/// use [`crate::from_str`] or [`crate::from_document`] for typed records.
pub struct Parser<'a> {
    input: &'a str,
    line_break: LineBreak,
}

impl<'a> Parser<'a> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Parser {
            input,
            line_break: LineBreak::default(),
        }
    }

    /// Sets the line break restored inside multiline values.
    #[must_use]
    pub fn with_line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }

    /// Parses the whole input into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns an error on the first row that is not in compact form, holds an
    /// unquoted value, or is not as wide as the header.
    pub fn parse_document(self) -> Result<Document> {
        let mut lines = self.input.split('\n');
        // `split` always yields at least one item
        let header_line = lines.next().unwrap_or_default();
        let header = split_row(header_line, 1, self.line_break)?;

        let mut rows = Vec::with_capacity(self.input.matches('\n').count());
        for (index, line) in lines.enumerate() {
            let values = split_row(line, index + 2, self.line_break)?;
            if values.len() != header.len() {
                return Err(Error::row_length(index + 1, values.len(), header.len()));
            }
            rows.push(values);
        }

        trace!(
            "parsed SCSV document with {} columns and {} rows",
            header.len(),
            rows.len()
        );
        Ok(Document::from_parts_unchecked(header, rows))
    }
}

/// Deserializes every data row of `document` into a `T`.
pub(crate) fn document_to_records<'a, T>(document: &'a Document) -> Result<Vec<T>>
where
    T: de::Deserialize<'a>,
{
    document
        .rows()
        .iter()
        .map(|row| {
            T::deserialize(RecordDeserializer {
                header: document.header(),
                row,
            })
        })
        .collect()
}

/// Presents one data row as a map from header label to value, or as a
/// sequence of values.
struct RecordDeserializer<'de> {
    header: &'de [Option<String>],
    row: &'de [Option<String>],
}

impl<'de> de::Deserializer<'de> for RecordDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(RecordAccess::new(self.header, self.row))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(FieldSeq {
            iter: self.row.iter(),
        })
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct enum identifier ignored_any
    }
}

struct RecordAccess<'de> {
    entries: Zip<slice::Iter<'de, Option<String>>, slice::Iter<'de, Option<String>>>,
    value: Option<(&'de str, Option<&'de str>)>,
}

impl<'de> RecordAccess<'de> {
    fn new(header: &'de [Option<String>], row: &'de [Option<String>]) -> Self {
        RecordAccess {
            entries: header.iter().zip(row.iter()),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for RecordAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        // null labels cannot name a field and are skipped
        match self.entries.find(|(label, _)| label.is_some()) {
            Some((Some(label), value)) => {
                self.value = Some((label.as_str(), value.as_deref()));
                seed.deserialize(BorrowedStrDeserializer::new(label.as_str()))
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some((column, value)) => seed.deserialize(FieldDeserializer { column, value }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }
}

struct FieldSeq<'de> {
    iter: slice::Iter<'de, Option<String>>,
}

impl<'de> de::SeqAccess<'de> for FieldSeq<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(FieldDeserializer {
                    column: "",
                    value: value.as_deref(),
                })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Deserializes a single nullable value. Scalars are parsed from the text.
struct FieldDeserializer<'de> {
    column: &'de str,
    value: Option<&'de str>,
}

impl<'de> FieldDeserializer<'de> {
    fn text(&self) -> Result<&'de str> {
        self.value.ok_or_else(|| self.invalid("a value", "null"))
    }

    fn invalid(&self, expected: &str, found: &str) -> Error {
        if self.column.is_empty() {
            Error::custom(format!("expected {expected}, found `{found}`"))
        } else {
            Error::custom(format!(
                "column `{}`: expected {expected}, found `{found}`",
                self.column
            ))
        }
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let text = self.text()?;
                match text.parse::<$ty>() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => Err(self.invalid(stringify!($ty), text)),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(text) => visitor.visit_borrowed_str(text),
            None => visitor.visit_none(),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
        deserialize_char => visit_char: char,
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.text()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.text()?.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(_) => visitor.visit_some(self),
            None => visitor.visit_none(),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            None => visitor.visit_unit(),
            Some(text) => Err(self.invalid("null", text)),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.text()?;
        visitor.visit_enum(IntoDeserializer::<Error>::into_deserializer(text))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        seq tuple tuple_struct map struct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn parse(input: &str) -> Result<Document> {
        Parser::from_str(input).parse_document()
    }

    #[test]
    fn test_header_only() {
        let doc = parse("\"a\",\"b\"").unwrap();
        assert_eq!(doc.width(), 2);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_empty_input_is_a_single_null_label() {
        let doc = parse("").unwrap();
        assert_eq!(doc.header(), &[None]);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_row_length_mismatch_reports_ordinal() {
        let err = parse("\"a\",\"b\"\n\"1\",\"2\"\n\"1\",\"2\",\"3\"").unwrap_err();
        assert!(matches!(
            err,
            Error::RowLength {
                row: 2,
                found: 3,
                expected: 2
            }
        ));
        assert_eq!(
            err.to_string(),
            "2nd row length (3) didn't match the headers length (2)."
        );
    }

    #[test]
    fn test_trailing_line_feed_is_an_extra_row() {
        let err = parse("\"a\",\"b\"\n\"1\",\"2\"\n").unwrap_err();
        assert!(matches!(err, Error::RowLength { row: 2, found: 1, .. }));
    }

    #[test]
    fn test_format_errors_carry_line_numbers() {
        assert!(matches!(
            parse("\"a\"\n\"1\"\nb"),
            Err(Error::NotCompact { line: 3 })
        ));
        assert!(matches!(
            parse("\"a\"\n\"1\"\nxy"),
            Err(Error::NotQuoted { line: 3 })
        ));
        assert!(matches!(parse("header"), Err(Error::NotQuoted { line: 1 })));
    }

    #[test]
    fn test_crlf_rows_are_rejected() {
        // a raw carriage return before the row separator leaves the value open
        assert!(parse("\"a\"\r\n\"b\"").is_err());
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Status {
        Active,
        Retired,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Employee<'a> {
        id: u32,
        name: &'a str,
        manager: Option<u32>,
        status: Status,
        rate: f64,
        remote: bool,
    }

    #[test]
    fn test_records_borrow_from_document() {
        let doc = parse(concat!(
            "\"id\",\"name\",\"manager\",\"status\",\"rate\",\"remote\",\"ignored\"\n",
            "\"1\",\"Ada\",,\"Active\",\"12.5\",\"true\",\"x\"\n",
            "\"2\",\"Grace\",\"1\",\"Retired\",\"0\",\"false\","
        ))
        .unwrap();

        let employees: Vec<Employee> = document_to_records(&doc).unwrap();
        assert_eq!(
            employees,
            vec![
                Employee {
                    id: 1,
                    name: "Ada",
                    manager: None,
                    status: Status::Active,
                    rate: 12.5,
                    remote: true,
                },
                Employee {
                    id: 2,
                    name: "Grace",
                    manager: Some(1),
                    status: Status::Retired,
                    rate: 0.0,
                    remote: false,
                },
            ]
        );
    }

    #[test]
    fn test_records_as_tuples() {
        let doc = parse("\"a\",\"b\"\n\"1\",").unwrap();
        let rows: Vec<(u8, Option<String>)> = document_to_records(&doc).unwrap();
        assert_eq!(rows, vec![(1, None)]);
    }

    #[test]
    fn test_null_labels_are_skipped() {
        let doc = parse(",\"b\"\n\"1\",\"2\"").unwrap();
        let rows: Vec<std::collections::BTreeMap<String, String>> =
            document_to_records(&doc).unwrap();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0]["b"], "2");
    }

    #[test]
    fn test_invalid_field_names_column() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Row {
            n: i32,
        }
        let doc = parse("\"n\"\n\"ten\"").unwrap();
        let err = document_to_records::<Row>(&doc).unwrap_err();
        assert_eq!(err.to_string(), "Error: column `n`: expected i32, found `ten`");

        let doc = parse("\"n\"\n").unwrap();
        let err = document_to_records::<Row>(&doc).unwrap_err();
        assert_eq!(err.to_string(), "Error: column `n`: expected a value, found `null`");
    }

    #[test]
    fn test_missing_column() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Row {
            a: String,
            b: String,
        }
        let doc = parse("\"a\"\n\"1\"").unwrap();
        let err = document_to_records::<Row>(&doc).unwrap_err();
        assert!(err.to_string().contains("missing field `b`"));
    }
}
