//! Single-row splitting, unescaping and escaping.
//!
//! A row is split on every comma first. Commas inside quoted values produce
//! extra fragments, which are merged back by looking at the run of double
//! quotes ending each fragment: an odd run closes the value, an even run is
//! made only of escaped quotes and the value continues past the comma.

use crate::options::LineBreak;
use crate::{Error, Result};

pub(crate) const QUOTE: char = '"';
pub(crate) const DELIMITER: char = ',';
/// Marker standing for a line break inside a value.
pub(crate) const LINE_MARKER: char = '\r';

enum State {
    AwaitingFieldStart,
    Accumulating(String),
}

/// Splits one SCSV row into its values, unescaping every non-null value.
///
/// `line` is the 1-based line number reported in errors.
pub(crate) fn split_row(
    row: &str,
    line: usize,
    line_break: LineBreak,
) -> Result<Vec<Option<String>>> {
    let mut values: Vec<Option<String>> = Vec::new();
    let mut state = State::AwaitingFieldStart;

    for fragment in row.split(DELIMITER) {
        state = match state {
            State::AwaitingFieldStart => {
                if fragment.is_empty() {
                    values.push(None);
                    continue;
                }
                // a lone quote opens a value whose first character is a comma
                if fragment.chars().nth(1).is_none() && !fragment.starts_with(QUOTE) {
                    return Err(Error::not_compact(line));
                }
                if !fragment.starts_with(QUOTE) {
                    return Err(Error::not_quoted(line));
                }
                // the opening quote never counts toward the closing run
                if trailing_quotes(&fragment[1..]) % 2 == 1 {
                    values.push(Some(unquote(fragment)));
                    State::AwaitingFieldStart
                } else {
                    State::Accumulating(fragment.to_string())
                }
            }
            State::Accumulating(mut buffer) => {
                buffer.push(DELIMITER);
                buffer.push_str(fragment);
                if trailing_quotes(fragment) % 2 == 1 {
                    values.push(Some(unquote(&buffer)));
                    State::AwaitingFieldStart
                } else {
                    State::Accumulating(buffer)
                }
            }
        };
    }

    if values.is_empty() || matches!(state, State::Accumulating(_)) {
        return Err(Error::not_compact(line));
    }

    Ok(values
        .into_iter()
        .map(|value| value.map(|v| unescape(&v, line_break)))
        .collect())
}

/// Escapes a value for the wire, without the surrounding quotes.
///
/// Every `"` is doubled and every line break (CRLF or LF) becomes a single
/// [`LINE_MARKER`].
pub(crate) fn escape(value: &str) -> String {
    value
        .replace(QUOTE, "\"\"")
        .replace("\r\n", "\r")
        .replace('\n', "\r")
}

fn unescape(value: &str, line_break: LineBreak) -> String {
    value
        .replace("\"\"", "\"")
        .replace(LINE_MARKER, line_break.as_str())
}

fn trailing_quotes(fragment: &str) -> usize {
    fragment.bytes().rev().take_while(|&b| b == b'"').count()
}

// Both ends are known to be quotes.
fn unquote(quoted: &str) -> String {
    quoted[1..quoted.len() - 1].to_string()
}
