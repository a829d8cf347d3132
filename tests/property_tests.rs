//! Property-based tests for the round-trip guarantees of the format.

use proptest::prelude::*;
use serde_scsv::{parse, parse_slice, serialize, serialize_to_string, Encoding};

// Carriage returns are reserved as the in-value line break marker, so they
// only appear as part of a line break.
fn value() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 ,\"\n\u{e9}\u{1F600}]{0,12}")
}

fn document() -> impl Strategy<Value = (Vec<Option<String>>, Vec<Vec<Option<String>>>)> {
    (1usize..5).prop_flat_map(|width| {
        (
            prop::collection::vec(value(), width),
            prop::collection::vec(prop::collection::vec(value(), width), 0..6),
        )
    })
}

fn encoding() -> impl Strategy<Value = Encoding> {
    prop::sample::select(Encoding::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_text_round_trip((header, rows) in document()) {
        let scsv = serialize_to_string(&header, &rows).unwrap();
        let doc = parse(&scsv).unwrap();
        prop_assert_eq!(doc.header(), header.as_slice());
        prop_assert_eq!(doc.rows(), rows.as_slice());
    }

    #[test]
    fn prop_bytes_round_trip((header, rows) in document(), encoding in encoding()) {
        let bytes = serialize(&header, &rows, encoding).unwrap();
        prop_assert!(bytes.starts_with(encoding.signature()));

        let doc = parse_slice(&bytes).unwrap();
        prop_assert_eq!(doc.header(), header.as_slice());
        prop_assert_eq!(doc.rows(), rows.as_slice());
        prop_assert_eq!(doc.to_bytes(encoding), bytes);
    }

    #[test]
    fn prop_no_trailing_line_feed((header, rows) in document()) {
        let scsv = serialize_to_string(&header, &rows).unwrap();
        let last_is_null = rows.last().map_or(false, |row| row.iter().all(Option::is_none));
        prop_assert!(!scsv.ends_with('\n') || (last_is_null && header.len() == 1));
    }
}
