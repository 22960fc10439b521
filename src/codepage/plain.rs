//! The plain (non-best-fit) vendor mapping format.
//!
//! These files carry no `CODEPAGE` section and no default pair: `#`-comment
//! lines plus bare `0x<cp> 0x<uni>` records, one mapping per line. Each
//! record applies in both directions and unmapped entries stay zero, so the
//! format needs no state machine.

use log::debug;

use super::line::{classify, LineKind};
use super::tables::{LookupTables, TableBuilder};

/// Build lookup tables from a plain mapping file.
///
/// `codepage` labels the result; plain files do not declare their own
/// number. Lines that are not records are ignored.
pub fn parse_plain(input: &str, codepage: u32) -> LookupTables {
    let mut builder = TableBuilder::new();
    let mut records: u64 = 0;

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        if let LineKind::Record { first, second } = classify(line) {
            builder.set_to_unicode(first, second);
            builder.set_from_unicode(second, first);
            records += 1;
        }
    }

    debug!("plain mapping for code page {}: {} records", codepage, records);
    builder.finish(codepage)
}
