//! Field scanner for strict RFC4180-subset CSV lines.
//!
//! Extracts exactly one field from a line of text, starting at a byte offset,
//! and reports where the next field begins. The scanner is a pure function of
//! `(line, start)`; it holds no cursor state, so the record loop in
//! [`crate::table`] can be tested independently of it.
//!
//! Offsets are byte offsets. The grammar characters (`,` and `"`) are ASCII,
//! so scanning bytes never cuts a multi-byte character: every slice boundary
//! falls on a delimiter, a quote, or the ends of the line.

use crate::constants::{DELIMITER, QUOTE};
use crate::error::GrammarViolation;

/// Scan one field beginning at `start`, returning the offset of the start of
/// the *next* field and the field's value.
///
/// `start` may equal `line.len()`, which denotes an empty final field (a line
/// ending in a delimiter implies one more field after it). The returned
/// offset exceeds `line.len()` once the final field has been consumed, so
/// callers loop `while offset <= line.len()`.
///
/// A field whose first character is a double-quote is parsed as an escaped
/// field; anything else is parsed verbatim up to the next delimiter or end of
/// line.
pub fn scan_field(line: &str, start: usize) -> Result<(usize, String), GrammarViolation> {
    debug_assert!(start <= line.len(), "scan offset past end of line");

    if line.as_bytes().get(start) == Some(&QUOTE) {
        scan_escaped(line, start)
    } else {
        scan_non_escaped(line, start)
    }
}

/// Scan an unquoted field: everything up to the next delimiter or end of
/// line, taken verbatim. A quote anywhere in the run is a grammar violation;
/// quotes are only legal as the very first character of a field.
fn scan_non_escaped(line: &str, start: usize) -> Result<(usize, String), GrammarViolation> {
    let bytes = line.as_bytes();
    let mut index = start;

    loop {
        if index >= bytes.len() || bytes[index] == DELIMITER {
            return Ok((index + 1, line[start..index].to_string()));
        }
        if bytes[index] == QUOTE {
            return Err(GrammarViolation::QuoteInUnquotedField { offset: index });
        }
        index += 1;
    }
}

/// Scan a quoted field: the opening quote at `start` is consumed, and the
/// field runs to a closing quote that is immediately followed by a delimiter
/// or the end of the line. A doubled quote inside the field is one literal
/// quote character; a closing quote followed by anything else is a grammar
/// violation, as is running out of line before the field closes.
fn scan_escaped(line: &str, start: usize) -> Result<(usize, String), GrammarViolation> {
    let bytes = line.as_bytes();
    let data_start = start + 1;
    let mut index = data_start;

    loop {
        if index >= bytes.len() {
            return Err(GrammarViolation::UnterminatedQuote { offset: start });
        }
        if bytes[index] == QUOTE {
            match bytes.get(index + 1) {
                // Closing quote at a field boundary. The captured text still
                // carries doubled quotes; collapse them to single quotes.
                None => {
                    return Ok((index + 2, line[data_start..index].replace("\"\"", "\"")));
                }
                Some(&next) if next == DELIMITER => {
                    return Ok((index + 2, line[data_start..index].replace("\"\"", "\"")));
                }
                // Doubled quote: one literal quote, keep scanning.
                Some(&next) if next == QUOTE => {
                    index += 2;
                    continue;
                }
                Some(_) => {
                    return Err(GrammarViolation::UnescapedQuote { offset: index });
                }
            }
        }
        index += 1;
    }
}
