//! Application constants for csv_tally
//!
//! Grammar characters and default values used throughout the crate.

// =============================================================================
// Grammar Characters
// =============================================================================

/// Field delimiter within a record
pub const DELIMITER: u8 = b',';

/// Quote character opening and closing an escaped field
pub const QUOTE: u8 = b'"';
