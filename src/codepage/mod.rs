//! Core code-page table generation module.

pub mod error;
pub mod line;
pub mod parser;
pub mod plain;
pub mod serialize;
pub mod tables;

use log::info;

pub use error::{CodePageError, Result};
pub use line::{classify, LineKind, TableKind};
pub use parser::{ParseState, ParseStats, Parser};
pub use plain::parse_plain;
pub use serialize::{FROM_UNICODE_OFFSET, SERIALIZED_LEN, TO_UNICODE_OFFSET};
pub use tables::{LookupTables, TableBuilder, TABLE_LEN};

/// Build lookup tables from the text of a best-fit mapping file.
///
/// Runs the whole pipeline: each line is classified, fed through the state
/// machine, and applied to the table pair. Succeeds only if the terminal
/// `ENDCODEPAGE` marker is reached; a truncated or structurally broken file
/// yields an error and no tables.
///
/// # Errors
/// - [`CodePageError::PrematureEnd`] if the input ends mid-section or
///   mid-block.
/// - [`CodePageError::StructuralFailure`] on input with no defined meaning
///   (e.g. a backwards DBCS lead-byte range).
pub fn parse_best_fit(input: &str) -> Result<LookupTables> {
    let mut parser = Parser::new();
    for line in input.lines() {
        parser.feed_line(line)?;
    }
    let (tables, stats) = parser.finish()?;

    info!(
        "code page {}: {} records applied over {} lines ({} skipped)",
        tables.codepage(),
        stats.records_applied,
        stats.lines,
        stats.skipped
    );

    Ok(tables)
}
