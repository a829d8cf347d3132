//! Reading and writing typed records with serde.
//!
//! Run with: cargo run --example records

use serde::{Deserialize, Serialize};
use serde_scsv::{from_slice, from_str, to_string, to_vec, Encoding};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Department {
    Engineering,
    Sales,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Employee {
    id: u32,
    name: String,
    department: Department,
    manager: Option<String>,
    notes: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let employees = vec![
        Employee {
            id: 1,
            name: "Alice \"Al\" Johnson".to_string(),
            department: Department::Engineering,
            manager: None,
            notes: "Team lead\nOn call this week".to_string(),
        },
        Employee {
            id: 2,
            name: "Bob Smith".to_string(),
            department: Department::Sales,
            manager: Some("Alice".to_string()),
            notes: String::new(),
        },
    ];

    let scsv = to_string(&employees)?;
    println!("SCSV output:\n{}\n", scsv.replace('\r', "\\r"));

    let back: Vec<Employee> = from_str(&scsv)?;
    assert_eq!(employees, back);
    println!("✓ Text round-trip successful");

    let bytes = to_vec(&employees, Encoding::Utf32BigEndian)?;
    let back: Vec<Employee> = from_slice(&bytes)?;
    assert_eq!(employees, back);
    println!("✓ UTF-32BE round-trip successful ({} bytes)", bytes.len());

    Ok(())
}
