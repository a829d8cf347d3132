//! SCSV Format Specification
//!
//! This module documents the Strict CSV (SCSV) format, version 0.1.0, as
//! implemented by this library.
//!
//! # Overview
//!
//! SCSV is a subset of CSV in which every table has exactly one textual form.
//! A reader never has to guess whether a field is null or empty, which line
//! ending a multiline value used, or where a quoted value ends.
//!
//! ## Design Philosophy
//!
//! - **Unambiguous**: null, empty string and text are always distinguishable
//! - **Round-trip safe**: writing a parsed document reproduces the same bytes
//! - **Strict**: anything outside the compact layout is an error, never a guess
//!
//! # Core Syntax
//!
//! ## Rows
//!
//! Rows are separated by a single line feed (`\n`, U+000A). The first row is
//! the header; every following row is a data row. There is no line feed after
//! the last row.
//!
//! ```text
//! "Value Type","Example"
//! "Normal","something or another"
//! ```
//!
//! **Rules**:
//! - Exactly one header row, followed by zero or more data rows
//! - Every data row has as many fields as the header
//! - A trailing line feed is a data row with a single null field, which fails
//!   the width check for any header wider than one column
//!
//! ## Fields
//!
//! Fields are separated by a comma (`,`). No other delimiter is accepted and no
//! whitespace is allowed around fields.
//!
//! | Value | Wire form |
//! |-------|-----------|
//! | Null | (nothing) |
//! | Empty string | `""` |
//! | Text | `"text"` |
//! | Text with quote | `"say ""hi"""` |
//! | Text with comma | `"a,b"` |
//! | Multiline text | `"first` CR `second"` |
//!
//! ```text
//! "Null",
//! "Empty String",""
//! ```
//!
//! ## Quoting
//!
//! Every non-null value starts and ends with a double quote (`"`). A double
//! quote inside a value is written twice.
//!
//! A value ends at the first double quote that is followed by a comma or by
//! the end of the row and that ends an **odd** run of double quotes. An even
//! run is entirely made of escaped quotes:
//!
//! ```text
//! "a"",b"      one value: a",b
//! "a""","b"    two values: a"  and  b
//! ```
//!
//! ## Line Breaks Inside Values
//!
//! A line feed always separates rows, so line breaks inside a value are written
//! as a single carriage return (`\r`, U+000D). Writers map both CRLF and LF to
//! one carriage return; readers turn each carriage return back into the
//! configured [`LineBreak`](crate::LineBreak).
//!
//! # Encodings
//!
//! | Encoding | Signature |
//! |----------|-----------|
//! | UTF-8 | (none) |
//! | UTF-8 with signature | `EF BB BF` |
//! | UTF-16 big endian | `FE FF` |
//! | UTF-16 little endian | `FF FE` |
//! | UTF-32 big endian | `00 00 FE FF` |
//! | UTF-32 little endian | `FF FE 00 00` |
//!
//! The signature is the only framing: the encoded text follows it directly.
//! Readers select the encoding from the signature and fall back to UTF-8.
//!
//! # Compact Format
//!
//! Only the compact layout is accepted. A reader rejects:
//!
//! - A one-character field that is not an opening quote (`a`, ` `)
//! - A field that does not start with a double quote (`ab`, ` "a"`)
//! - A quoted value that is never closed (`"abc`)
//! - A data row whose width differs from the header's
//!
//! # Limitations
//!
//! - **Header nulls**: allowed by the grammar; labels are otherwise unconstrained
//! - **Duplicate labels**: allowed in documents; derived structs reject them
//!   as duplicate fields when reading typed records
//! - **Carriage returns**: a value cannot hold a carriage return distinct from
//!   a line break

// This module contains only documentation; no implementation code
