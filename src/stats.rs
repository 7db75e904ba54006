//! Column summation across parsed tables.
//!
//! Sums a named column over one or more tables and reports the sum, mean, and
//! value count. Every value in the column must parse as a number or currency
//! amount; a single unparsable value fails the whole summary, mirroring the
//! all-or-nothing contract of the parser itself.

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TallyError};
use crate::numeric::parse_amount;
use crate::table::Table;

/// Sum, mean, and count of a named column accumulated across tables.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub sum: f64,
    pub mean: f64,
    pub count: usize,
}

/// Summarize the named column across every table.
///
/// Each table must carry the column (exact name match); the mean is taken
/// over the combined value count, so tables with more records weigh more.
/// A column with zero values across all tables has no mean and is an error.
pub fn summarize_column(tables: &[Table], column: &str) -> Result<ColumnSummary> {
    let mut sum = 0.0;
    let mut count = 0;

    for table in tables {
        let values = table.column(column)?;
        sum += sum_values(&values, column)?;
        count += values.len();
    }

    if count == 0 {
        return Err(TallyError::EmptyColumn {
            column: column.to_string(),
        });
    }

    debug!(column, sum, count, "summarized column");

    Ok(ColumnSummary {
        column: column.to_string(),
        sum,
        mean: sum / count as f64,
        count,
    })
}

/// Sum one table's worth of column values.
fn sum_values(values: &[&str], column: &str) -> Result<f64> {
    let mut sum = 0.0;
    for value in values {
        sum += parse_amount(value).ok_or_else(|| TallyError::invalid_number(column, *value))?;
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(lines: &[&str]) -> Table {
        Table::parse(lines).unwrap()
    }

    #[test]
    fn test_summarize_single_table() {
        let tables = [table(&["Name,Cost", "a,10", "b,20", "c,30"])];
        let summary = summarize_column(&tables, "Cost").unwrap();

        assert_eq!(summary.sum, 60.0);
        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_summarize_across_tables() {
        let tables = [
            table(&["Cost", "1.50", "2.50"]),
            table(&["Cost", "$6.00"]),
        ];
        let summary = summarize_column(&tables, "Cost").unwrap();

        assert_eq!(summary.sum, 10.0);
        // Mean over the combined count, not per-table means averaged
        assert_eq!(summary.mean, 10.0 / 3.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_quoted_column_name_with_delimiter() {
        let tables = [table(&[
            "\"Cost, Initial\",Item",
            "\"$1,000.00\",widget",
            "$500.00,gadget",
        ])];
        let summary = summarize_column(&tables, "Cost, Initial").unwrap();
        assert_eq!(summary.sum, 1500.0);
    }

    #[test]
    fn test_missing_column_fails() {
        let tables = [table(&["a,b", "1,2"])];
        assert!(matches!(
            summarize_column(&tables, "c"),
            Err(TallyError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_unparsable_value_fails() {
        let tables = [table(&["Cost", "10", "widget"])];
        let err = summarize_column(&tables, "Cost").unwrap_err();
        match err {
            TallyError::InvalidNumber { column, value } => {
                assert_eq!(column, "Cost");
                assert_eq!(value, "widget");
            }
            other => panic!("expected invalid number, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_column_fails() {
        let tables = [table(&["Cost"])];
        assert!(matches!(
            summarize_column(&tables, "Cost"),
            Err(TallyError::EmptyColumn { .. })
        ));
    }
}
