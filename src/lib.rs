//! # cpmaker
//!
//! Converts vendor-published code-page mapping files (the unicode.org
//! "WindowsBestFit" format and the plain two-column format) into fixed-size
//! binary lookup tables for translating between Unicode code points and a
//! legacy Windows code page, including double-byte (DBCS) encodings.
//!
//! The crate only *builds* the tables; retrieving mapping files and the
//! runtime transcoding that consumes the finished tables live elsewhere.
pub mod codepage;

// Re-export the main types for convenience
pub use codepage::{
    parse_best_fit, parse_plain, CodePageError, LookupTables, ParseStats, Parser, Result,
    SERIALIZED_LEN, TABLE_LEN,
};
