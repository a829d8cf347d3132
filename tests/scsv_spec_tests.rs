use serde_scsv::{parse, parse_slice, serialize, serialize_to_string, Document, Encoding, Error};

const SAMPLE: &str = concat!(
    "\"Value Type\",\"Example\"\n",
    "\"Normal\",\"something or another\"\n",
    "\"Contains Double Quotes\",\"\"\"The way to get started is to quit talking and begin doing\"\" -Walt Disney\"\n",
    "\"Multiline\",\"first line\rsecond line\rthird line\"\n",
    "\"Empty String\",\"\"\n",
    "\"Null\","
);

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn assert_sample(doc: &Document) {
    assert_eq!(doc.header(), &[text("Value Type"), text("Example")]);
    assert_eq!(doc.len(), 5);
    assert_eq!(doc.width(), 2);

    assert_eq!(doc.get(0, 0), Some("Normal"));
    assert_eq!(doc.get(0, 1), Some("something or another"));
    assert_eq!(doc.get(1, 0), Some("Contains Double Quotes"));
    assert_eq!(
        doc.get(1, 1),
        Some("\"The way to get started is to quit talking and begin doing\" -Walt Disney")
    );
    assert_eq!(doc.get(2, 0), Some("Multiline"));
    assert_eq!(doc.get(2, 1), Some("first line\nsecond line\nthird line"));
    assert_eq!(doc.get(3, 0), Some("Empty String"));
    assert_eq!(doc.cell(3, 1), Some(Some("")));
    assert_eq!(doc.get(4, 0), Some("Null"));
    assert_eq!(doc.cell(4, 1), Some(None));
}

#[test]
fn test_sample_document_parses() {
    let doc = parse(SAMPLE).unwrap();
    assert_sample(&doc);
}

#[test]
fn test_sample_document_round_trips_in_every_encoding() {
    for encoding in Encoding::ALL {
        let expected = encoding.encode_with_signature(SAMPLE);

        let doc = parse_slice(&expected).unwrap();
        assert_sample(&doc);

        let actual = serialize(doc.header(), doc.rows(), encoding).unwrap();
        assert_eq!(actual, expected, "{encoding}");
    }
}

#[test]
fn test_normal_example() {
    let header = vec![text("Value Type"), text("Example")];
    let rows = vec![vec![text("Normal"), text("something or another")]];

    let bytes = serialize(&header, &rows, Encoding::Utf8).unwrap();
    assert_eq!(
        bytes,
        b"\"Value Type\",\"Example\"\n\"Normal\",\"something or another\""
    );

    let doc = parse_slice(&bytes).unwrap();
    assert_eq!(doc.header(), header.as_slice());
    assert_eq!(doc.rows(), rows.as_slice());
}

#[test]
fn test_null_example() {
    let header = vec![text("Value Type"), text("Example")];
    let rows = vec![vec![text("Null"), None]];

    let scsv = serialize_to_string(&header, &rows).unwrap();
    assert_eq!(scsv, "\"Value Type\",\"Example\"\n\"Null\",");

    let doc = parse(&scsv).unwrap();
    assert_eq!(doc.cell(0, 1), Some(None));
}

#[test]
fn test_null_and_empty_string_are_distinct() {
    let header = vec![text("a"), text("b")];
    let rows = vec![vec![None, text("")], vec![text(""), None]];

    let scsv = serialize_to_string(&header, &rows).unwrap();
    assert_eq!(scsv, "\"a\",\"b\"\n,\"\"\n\"\",");
    assert_eq!(parse(&scsv).unwrap().rows(), rows.as_slice());
}

#[test]
fn test_quotes_and_commas_round_trip() {
    let header = vec![text("tricky")];
    let values = [
        "\"",
        "\"\"",
        ",",
        ",\"",
        "\",",
        "a\",b",
        "a\"\",\"\"b",
        "ends with quote\"",
        "\"starts with quote",
        ",,,",
    ];
    let rows: Vec<_> = values.iter().map(|v| vec![text(v)]).collect();

    let scsv = serialize_to_string(&header, &rows).unwrap();
    let doc = parse(&scsv).unwrap();
    assert_eq!(doc.rows(), rows.as_slice());
}

#[test]
fn test_multiline_uses_carriage_return_marker() {
    let header = vec![text("note")];
    let rows = vec![vec![text("one\r\ntwo\nthree")]];

    let scsv = serialize_to_string(&header, &rows).unwrap();
    assert_eq!(scsv, "\"note\"\n\"one\rtwo\rthree\"");
    assert!(!scsv["\"note\"\n".len()..].contains('\n'));

    let doc = parse(&scsv).unwrap();
    assert_eq!(doc.get(0, 0), Some("one\ntwo\nthree"));
}

#[test]
fn test_second_row_width_mismatch() {
    let err = parse("\"a\",\"b\"\n\"1\",\"2\"\n\"3\",\"4\",\"5\"").unwrap_err();
    assert_eq!(
        err.to_string(),
        "2nd row length (3) didn't match the headers length (2)."
    );
}

#[test]
fn test_lone_character_is_not_compact() {
    assert!(matches!(parse("\"a\"\na"), Err(Error::NotCompact { line: 2 })));
    assert!(matches!(parse("\"a\"\n\"abc"), Err(Error::NotCompact { line: 2 })));
}

#[test]
fn test_unquoted_value_rejected() {
    let err = parse("\"a\",\"b\"\n\"1\",two").unwrap_err();
    assert!(matches!(err, Error::NotQuoted { line: 2 }));
    assert!(err.to_string().starts_with("Non-null values must be surrounded by double quotes"));
}

#[test]
fn test_signatures() {
    let header = vec![text("a")];
    let rows: Vec<Vec<Option<String>>> = Vec::new();

    let plain = serialize(&header, &rows, Encoding::Utf8).unwrap();
    assert_eq!(plain, b"\"a\"");

    let signed = serialize(&header, &rows, Encoding::Utf8WithBom).unwrap();
    assert_eq!(signed, b"\xEF\xBB\xBF\"a\"");

    let utf16 = serialize(&header, &rows, Encoding::Utf16LittleEndian).unwrap();
    assert_eq!(utf16, [0xFF, 0xFE, b'"', 0, b'a', 0, b'"', 0]);

    let utf32 = serialize(&header, &rows, Encoding::Utf32BigEndian).unwrap();
    assert_eq!(
        utf32,
        [0, 0, 0xFE, 0xFF, 0, 0, 0, b'"', 0, 0, 0, b'a', 0, 0, 0, b'"']
    );
}

#[test]
fn test_invalid_utf8_rejected() {
    let err = parse_slice(b"\"\xFF\"").unwrap_err();
    assert!(matches!(err, Error::UnsupportedEncoding));
    assert!(err.to_string().starts_with("Only UTF-8, UTF-16"));
}

#[test]
fn test_header_nulls_pass_through() {
    let header = vec![None, text("b")];
    let rows = vec![vec![text("1"), None]];

    let scsv = serialize_to_string(&header, &rows).unwrap();
    assert_eq!(scsv, ",\"b\"\n\"1\",");

    let doc = parse(&scsv).unwrap();
    assert_eq!(doc.header(), header.as_slice());
}
