//! SCSV serialization.
//!
//! This module turns a header plus a grid of nullable strings into SCSV text,
//! and provides the serde plumbing that flattens typed records into rows.
//!
//! ## Layout
//!
//! - Non-null values are wrapped in double quotes, with `"` doubled and line
//!   breaks replaced by a carriage return
//! - Null values are written as nothing at all
//! - Values are separated by `,` and rows by `\n`
//! - There is no trailing line feed after the last row
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_scsv::to_string;
//!
//! #[derive(Serialize)]
//! struct Sample<'a> {
//!     #[serde(rename = "Value Type")]
//!     kind: &'a str,
//!     #[serde(rename = "Example")]
//!     example: Option<&'a str>,
//! }
//!
//! let rows = [
//!     Sample { kind: "Normal", example: Some("something or another") },
//!     Sample { kind: "Null", example: None },
//! ];
//! let scsv = to_string(&rows).unwrap();
//! assert_eq!(
//!     scsv,
//!     "\"Value Type\",\"Example\"\n\"Normal\",\"something or another\"\n\"Null\","
//! );
//! ```

use crate::row::{escape, DELIMITER, QUOTE};
use crate::{Document, Error, Result};
use serde::ser::{self, Impossible, Serialize};

/// Writes a header and its rows as SCSV text.
///
/// The shape is not checked here; see [`Document::new`].
pub(crate) fn write_document(header: &[Option<String>], rows: &[Vec<Option<String>>]) -> String {
    // Pre-allocate with reasonable capacity to reduce reallocations
    let mut output = String::with_capacity(256);
    write_row(&mut output, header);
    for row in rows {
        output.push('\n');
        write_row(&mut output, row);
    }
    output
}

fn write_row(output: &mut String, values: &[Option<String>]) {
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            output.push(DELIMITER);
        }
        if let Some(value) = value {
            output.push(QUOTE);
            output.push_str(&escape(value));
            output.push(QUOTE);
        }
    }
}

/// Serializes typed records into a [`Document`].
///
/// The header is taken from the field names of the first record; every later
/// record must produce the same names in the same order.
pub(crate) fn records_to_document<T>(records: &[T]) -> Result<Document>
where
    T: Serialize,
{
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Record { labels, values } = record.serialize(RecordSerializer)?;
        if let Some(expected) = &header {
            if *expected != labels {
                return Err(Error::custom(format!(
                    "record {} has fields {:?}, expected {:?}",
                    index + 1,
                    labels,
                    expected
                )));
            }
        } else {
            header = Some(labels);
        }
        rows.push(values);
    }

    let header = header
        .map(|labels| labels.into_iter().map(Some).collect())
        .unwrap_or_default();
    Document::new(header, rows)
}

/// One record flattened into labels and values.
struct Record {
    labels: Vec<String>,
    values: Vec<Option<String>>,
}

/// Serializes a struct or map into a [`Record`].
struct RecordSerializer;

struct RecordBuilder {
    labels: Vec<String>,
    values: Vec<Option<String>>,
    current_label: Option<String>,
}

impl RecordBuilder {
    fn new(len: Option<usize>) -> Self {
        let capacity = len.unwrap_or(0);
        RecordBuilder {
            labels: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            current_label: None,
        }
    }

    fn push<T>(&mut self, label: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.labels.push(label);
        self.values.push(value.serialize(FieldSerializer)?);
        Ok(())
    }

    fn finish(self) -> Record {
        Record {
            labels: self.labels,
            values: self.values,
        }
    }
}

fn not_a_record(kind: &str) -> Error {
    Error::unsupported_type(&format!("{kind} cannot be a record, use a struct or a map"))
}

impl ser::Serializer for RecordSerializer {
    type Ok = Record;
    type Error = Error;

    type SerializeSeq = Impossible<Record, Error>;
    type SerializeTuple = Impossible<Record, Error>;
    type SerializeTupleStruct = Impossible<Record, Error>;
    type SerializeTupleVariant = Impossible<Record, Error>;
    type SerializeMap = RecordBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = Impossible<Record, Error>;

    fn serialize_bool(self, _v: bool) -> Result<Record> {
        Err(not_a_record("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Record> {
        Err(not_a_record("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Record> {
        Err(not_a_record("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Record> {
        Err(not_a_record("float"))
    }

    fn serialize_char(self, _v: char) -> Result<Record> {
        Err(not_a_record("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<Record> {
        Err(not_a_record("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Record> {
        Err(not_a_record("bytes"))
    }

    fn serialize_none(self) -> Result<Record> {
        Err(not_a_record("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Record>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Record> {
        Err(not_a_record("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Record> {
        Err(not_a_record("unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Record> {
        Err(not_a_record("enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Record>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Record>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_record("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_a_record("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_a_record("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_a_record("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_record("enum variant"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<RecordBuilder> {
        Ok(RecordBuilder::new(len))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<RecordBuilder> {
        Ok(RecordBuilder::new(Some(len)))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_record("enum variant"))
    }
}

impl ser::SerializeMap for RecordBuilder {
    type Ok = Record;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(FieldSerializer)? {
            Some(label) => {
                self.current_label = Some(label);
                Ok(())
            }
            None => Err(Error::custom("record keys must not be null")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let label = self
            .current_label
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.push(label, value)
    }

    fn end(self) -> Result<Record> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Record;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key.to_string(), value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        // skipped fields still occupy their column
        self.labels.push(key.to_string());
        self.values.push(None);
        Ok(())
    }

    fn end(self) -> Result<Record> {
        Ok(self.finish())
    }
}

/// Serializes a single field into its nullable string form.
struct FieldSerializer;

fn not_a_field(kind: &str) -> Error {
    Error::unsupported_type(&format!("{kind} cannot be stored in a single SCSV value"))
}

impl ser::Serializer for FieldSerializer {
    type Ok = Option<String>;
    type Error = Error;

    type SerializeSeq = Impossible<Option<String>, Error>;
    type SerializeTuple = Impossible<Option<String>, Error>;
    type SerializeTupleStruct = Impossible<Option<String>, Error>;
    type SerializeTupleVariant = Impossible<Option<String>, Error>;
    type SerializeMap = Impossible<Option<String>, Error>;
    type SerializeStruct = Impossible<Option<String>, Error>;
    type SerializeStructVariant = Impossible<Option<String>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Option<String>> {
        Ok(Some(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Option<String>> {
        Err(not_a_field("bytes"))
    }

    fn serialize_none(self) -> Result<Option<String>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<String>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<String>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<String>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<String>> {
        Ok(Some(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<String>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Option<String>>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_field("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_a_field("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_a_field("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_a_field("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_field("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(not_a_field("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(not_a_field("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_field("struct variant"))
    }
}
