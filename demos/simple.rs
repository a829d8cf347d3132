//! Parsing and writing SCSV documents.
//!
//! Run with: cargo run --example simple

use serde_scsv::{parse, parse_slice, serialize, Encoding};
use std::error::Error;

const SAMPLE: &str = "\"Value Type\",\"Example\"\n\
\"Normal\",\"something or another\"\n\
\"Contains Double Quotes\",\"He said \"\"hello\"\"\"\n\
\"Multiline\",\"first line\rsecond line\"\n\
\"Empty String\",\"\"\n\
\"Null\",";

fn main() -> Result<(), Box<dyn Error>> {
    let document = parse(SAMPLE)?;
    println!("Header: {:?}", document.header());

    for row in document.rows() {
        println!("{:?}", row);
    }

    // Null and empty string stay distinct
    let empty = document.cell(3, 1);
    let null = document.cell(4, 1);
    println!("\nEmpty string: {:?}, null: {:?}", empty, null);

    // Re-encode with a signature and read it back
    let bytes = serialize(document.header(), document.rows(), Encoding::Utf16LittleEndian)?;
    println!("UTF-16LE output: {} bytes, signature {:02X?}", bytes.len(), &bytes[..2]);

    let reparsed = parse_slice(&bytes)?;
    assert_eq!(document, reparsed);
    println!("✓ Round-trip successful");

    // Anything outside the compact layout is rejected
    match parse("\"a\",\"b\"\n \"x\",\"y\"") {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("\nRejected: {}", err),
    }

    Ok(())
}
