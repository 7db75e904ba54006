//! csv_tally
//!
//! A strict RFC4180-subset CSV table parser with column summation utilities.
//!
//! The parser follows a fixed grammar rather than ad-hoc splitting:
//!
//! ```text
//! file    = header LINEBREAK record *(LINEBREAK record) [LINEBREAK]
//! header  = field *("," field)
//! record  = field *("," field)
//! field   = escaped / nonescaped
//! escaped = DQUOTE *(TEXTDATA / "," / DQUOTE DQUOTE) DQUOTE
//! nonescaped = *TEXTDATA
//! TEXTDATA = any character except "," , DQUOTE, CR, LF
//! ```
//!
//! This library provides:
//! - A character-level field scanner handling quoted fields, embedded
//!   delimiters, doubled quotes, and empty fields ([`scanner`])
//! - A table builder that validates every record against the header's field
//!   count ([`table`])
//! - Column sum/mean reporting over plain-number and US-currency values
//!   ([`stats`], [`numeric`])
//! - A point-to-rectangle distance utility ([`geometry`])
//!
//! Malformed input is a terminal condition: a parse either yields a fully
//! valid [`Table`] or fails with line and offset context, never a partial
//! result.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod numeric;
pub mod scanner;
pub mod stats;
pub mod table;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use error::{GrammarViolation, Result, TallyError};
pub use geometry::Rect;
pub use stats::ColumnSummary;
pub use table::Table;
