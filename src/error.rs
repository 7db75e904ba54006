//! Error handling for CSV parsing and reporting operations.
//!
//! Errors split into two families: [`GrammarViolation`] for malformed text
//! inside a single line (produced by the field scanner, which knows byte
//! offsets but not line numbers) and [`TallyError`] for everything the crate
//! surfaces to callers, with line numbers and column names attached.

use thiserror::Error;

/// A line of CSV text that does not match the grammar.
///
/// Offsets are 0-based byte positions within the offending line. The scanner
/// produces these without line context; [`TallyError::Grammar`] adds the line
/// number when a violation surfaces from a full table parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarViolation {
    #[error("double-quote at offset {offset} inside an unquoted field (quotes are only legal as the first character of a field)")]
    QuoteInUnquotedField { offset: usize },

    #[error("closing double-quote at offset {offset} is not followed by a comma or end of line")]
    UnescapedQuote { offset: usize },

    #[error("quoted field opened at offset {offset} is never closed")]
    UnterminatedQuote { offset: usize },
}

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV on line {line}: {violation}")]
    Grammar {
        line: usize,
        #[source]
        violation: GrammarViolation,
    },

    #[error("field count mismatch on line {line}: header has {expected} fields, record has {found}")]
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("column not found: '{name}'")]
    ColumnNotFound { name: String },

    #[error("column '{column}' contains a value that is neither a number nor a currency amount: '{value}'")]
    InvalidNumber { column: String, value: String },

    #[error("column '{column}' has no values to summarize")]
    EmptyColumn { column: String },

    #[error(
        "degenerate rectangle: min ({min_x}, {min_y}) must be strictly below max ({max_x}, {max_y}) on both axes"
    )]
    DegenerateRect {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TallyError {
    /// Attach a 1-based line number to a scanner violation
    pub fn grammar(line: usize, violation: GrammarViolation) -> Self {
        Self::Grammar { line, violation }
    }

    /// Create a field count mismatch error
    pub fn field_count_mismatch(line: usize, expected: usize, found: usize) -> Self {
        Self::FieldCountMismatch {
            line,
            expected,
            found,
        }
    }

    /// Create a column lookup error
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create a numeric parse error with the offending value preserved
    pub fn invalid_number(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
