//! Parsers for the quasi-CSV response format of PUMAPI
//!
//! PUMAPI responses are not valid CSV: string fields are double-quoted but
//! booleans and bare integers are not, and quoted fields may contain commas.
//! A general-purpose CSV parser cannot round-trip this format, so responses
//! are normalized and split by hand.
//!
//! The parser is organized into logical components:
//! - [`quoting`] - pattern-based field quoting repair
//! - [`single`] - two-line (header + data) response parsing
//! - [`multi`] - header + N data lines response parsing
//! - [`value`] - loosely typed field values and the intermediate record
//!
//! All parsers support a `graceful` mode (the default used by the
//! connection): inconsistencies between header and data are logged and
//! worked around instead of raising an error.

pub mod multi;
pub mod quoting;
pub mod single;
pub mod value;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use multi::parse_multi_response;
pub use quoting::{repair_quoting, split_repaired_line};
pub use single::parse_single_response;
pub use value::{FieldValue, RawRecord};
