//! Custom error types for the cpmaker crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum CodePageError {
    /// An error originating from I/O operations (the mapping file could not
    /// be read, or the artifact could not be written).
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The input ended before the `ENDCODEPAGE` marker was reached or before
    /// a counted block was exhausted. The tables are incomplete and must not
    /// be emitted.
    #[error("mapping file ended prematurely at line {line_no} while {state}")]
    PrematureEnd {
        state: &'static str,
        line_no: u64,
    },

    /// The parser reached a state/input combination with no defined meaning,
    /// e.g. a DBCS lead-byte range running backwards.
    #[error("structural failure at line {line_no}: {reason}")]
    StructuralFailure {
        reason: String,
        line_no: u64,
    },
}

/// A convenience `Result` type alias using the crate's `CodePageError` type.
pub type Result<T> = std::result::Result<T, CodePageError>;
