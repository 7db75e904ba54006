//! CSV table parsing and the parsed-table data model.
//!
//! A [`Table`] is built in a single pass over a sequence of lines: the first
//! line becomes the header, and every later line becomes a record whose field
//! count must match the header's. Parsing either completes and yields a fully
//! valid table or fails with the first error it hits; there is no recovery or
//! skip-and-continue, so a `Table` never holds partial data.
//!
//! The line source is external: [`Table::parse`] accepts any iterator of
//! string-like lines with their terminators already stripped, and
//! [`Table::read_path`] delegates to [`BufRead::lines`], which strips both
//! `\n` and `\r\n`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{GrammarViolation, Result, TallyError};
use crate::scanner::scan_field;

/// A fully parsed CSV table: one header plus zero or more records, every
/// record exactly as wide as the header.
///
/// Header names need not be unique; [`Table::column_index`] resolves a name
/// to the first column bearing it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    header: Vec<String>,
    records: Vec<Vec<String>>,
    #[serde(skip)]
    columns: HashMap<String, usize>,
}

impl Table {
    /// Parse a table from a sequence of lines.
    ///
    /// The first line is the header; each subsequent line must scan to the
    /// same number of fields. Zero lines yield an empty table with no header
    /// and no records. Any grammar violation or field count mismatch aborts
    /// the parse with the offending 1-based line number attached.
    pub fn parse<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Table::default();
        let mut expected = None;

        for (index, line) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            let record = scan_record(line.as_ref())
                .map_err(|violation| TallyError::grammar(line_number, violation))?;

            match expected {
                None => {
                    expected = Some(record.len());
                    table.columns = index_columns(&record);
                    table.header = record;
                }
                Some(count) => {
                    if record.len() != count {
                        return Err(TallyError::field_count_mismatch(
                            line_number,
                            count,
                            record.len(),
                        ));
                    }
                    table.records.push(record);
                }
            }
        }

        debug!(
            columns = table.header.len(),
            records = table.records.len(),
            "parsed table"
        );

        Ok(table)
    }

    /// Read and parse a table from a file on disk.
    pub fn read_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let lines = reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?;
        Self::parse(lines)
    }

    /// The header row, in column order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All records, in input order. Each is exactly as wide as the header.
    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// True when the input had no lines at all.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.records.is_empty()
    }

    /// Resolve a column name to its index. Exact match; when the header
    /// repeats a name, the first occurrence wins.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// The values of the named column, one per record, in record order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| TallyError::column_not_found(name))?;

        Ok(self
            .records
            .iter()
            .map(|record| record[index].as_str())
            .collect())
    }
}

/// Scan a whole line into its ordered list of fields.
///
/// The loop runs while `offset <= line.len()`: a trailing delimiter leaves
/// the offset exactly at the line length, which denotes one more empty final
/// field. A blank line is therefore a record of a single empty field, not an
/// absent record.
fn scan_record(line: &str) -> std::result::Result<Vec<String>, GrammarViolation> {
    let mut fields = Vec::new();
    let mut offset = 0;

    while offset <= line.len() {
        let (next, field) = scan_field(line, offset)?;
        fields.push(field);
        offset = next;
    }

    Ok(fields)
}

/// Build the name-to-index map from the header, left to right. First
/// occurrence of a duplicated name wins.
fn index_columns(header: &[String]) -> HashMap<String, usize> {
    let mut columns = HashMap::with_capacity(header.len());
    for (index, name) in header.iter().enumerate() {
        columns.entry(name.clone()).or_insert(index);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let table = Table::parse(["column1,column2,column3", "a,b,c", "d,e,f"]).unwrap();

        assert_eq!(table.header(), &["column1", "column2", "column3"]);
        assert_eq!(
            table.records(),
            &[vec!["a", "b", "c"], vec!["d", "e", "f"]]
        );
    }

    #[test]
    fn test_trailing_delimiter_yields_empty_final_field() {
        let table = Table::parse(["h1,h2,h3", "a,b,"]).unwrap();
        assert_eq!(table.records()[0], vec!["a", "b", ""]);
    }

    #[test]
    fn test_blank_lines_are_single_empty_records() {
        // Four blank lines: a one-column header of "" and three records of ""
        let table = Table::parse(["", "", "", ""]).unwrap();
        assert_eq!(table.header(), &[""]);
        assert_eq!(table.records(), &[vec![""], vec![""], vec![""]]);
    }

    #[test]
    fn test_blank_line_mismatches_wider_header() {
        let err = Table::parse(["h1,h2", ""]).unwrap_err();
        match err {
            TallyError::FieldCountMismatch {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected field count mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_delimiter_preserved() {
        let table = Table::parse(["h1,h2", "\"x,y\",z"]).unwrap();
        assert_eq!(table.records(), &[vec!["x,y", "z"]]);
    }

    #[test]
    fn test_doubled_quote_collapses_in_record() {
        let table = Table::parse(["h1", "\"a\"\"b\""]).unwrap();
        assert_eq!(table.records(), &[vec!["a\"b"]]);
    }

    #[test]
    fn test_short_record_is_schema_violation() {
        let err = Table::parse(["h1,h2", "a"]).unwrap_err();
        assert!(matches!(
            err,
            TallyError::FieldCountMismatch {
                line: 2,
                expected: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn test_quote_in_unquoted_field_aborts_with_line_number() {
        let err = Table::parse(["h1", "a\"b"]).unwrap_err();
        match err {
            TallyError::Grammar { line, violation } => {
                assert_eq!(line, 2);
                assert_eq!(
                    violation,
                    GrammarViolation::QuoteInUnquotedField { offset: 1 }
                );
            }
            other => panic!("expected grammar violation, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_header_aborts_on_line_one() {
        let err = Table::parse(["\"h1", "a"]).unwrap_err();
        assert!(matches!(
            err,
            TallyError::Grammar {
                line: 1,
                violation: GrammarViolation::UnterminatedQuote { offset: 0 },
            }
        ));
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let table = Table::parse(Vec::<String>::new()).unwrap();
        assert!(table.is_empty());
        assert!(table.header().is_empty());
        assert!(table.records().is_empty());
    }

    #[test]
    fn test_reparse_is_identical() {
        let lines = ["h1,h2", "\"x,y\",z", "a,"];
        let first = Table::parse(lines).unwrap();
        let second = Table::parse(lines).unwrap();
        assert_eq!(first.header(), second.header());
        assert_eq!(first.records(), second.records());
    }

    #[test]
    fn test_quoted_header_names() {
        let table = Table::parse(["\"Cost, Initial\",Name", "12.50,widget"]).unwrap();
        assert_eq!(table.header(), &["Cost, Initial", "Name"]);
        assert_eq!(table.column("Cost, Initial").unwrap(), vec!["12.50"]);
    }

    #[test]
    fn test_column_lookup() {
        let table = Table::parse(["a,b,c", "1,2,3", "4,5,6"]).unwrap();
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column("c").unwrap(), vec!["3", "6"]);
        assert!(matches!(
            table.column("missing"),
            Err(TallyError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_header_first_match_wins() {
        let table = Table::parse(["x,x", "first,second"]).unwrap();
        assert_eq!(table.column_index("x"), Some(0));
        assert_eq!(table.column("x").unwrap(), vec!["first"]);
    }

    #[test]
    fn test_column_name_match_is_exact() {
        let table = Table::parse([" padded ,b", "1,2"]).unwrap();
        assert!(table.column_index("padded").is_none());
        assert_eq!(table.column_index(" padded "), Some(0));
    }
}
