//! The best-fit mapping-file parser: a state machine over classified lines.
//!
//! The grammar is block structured: a `CODEPAGE` section holds one `CPINFO`
//! default declaration followed by any number of counted record blocks
//! (`MBTABLE`, `WCTABLE`, and `DBCSRANGE` groups of `DBCSTABLE`s), closed by
//! `ENDCODEPAGE`. Each state carries its own pending counters, so a counter
//! can never leak across block kinds.

use log::{debug, trace};

use super::error::{CodePageError, Result};
use super::line::{classify, LineKind, TableKind};
use super::tables::{LookupTables, TableBuilder};

/// Current position in the mapping-file grammar.
///
/// DBCS states carry the whole pending context (current lead byte, lead
/// bytes left in the range, ranges left in the group) so that finishing one
/// trail-byte table can resume the enclosing range or group directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Waiting for the `CODEPAGE` section start.
    Searching,
    /// Waiting for the `CPINFO` default-pair declaration.
    AwaitingDefault,
    /// Waiting for a table header, a DBCS range header, or `ENDCODEPAGE`.
    AwaitingTable,
    /// Consuming `remaining` single-byte records.
    InSingleByteTable { remaining: u32 },
    /// Waiting for the next lead-byte span record; `ranges_remaining`
    /// includes the span being awaited.
    InDbcsRange { ranges_remaining: u32 },
    /// Waiting for the `DBCSTABLE` header of lead byte `lead`.
    AwaitingDbcsTable {
        lead: u8,
        leads_remaining: u32,
        ranges_remaining: u32,
    },
    /// Consuming `remaining` trail-byte records under lead byte `lead`.
    InDbcsTable {
        lead: u8,
        leads_remaining: u32,
        ranges_remaining: u32,
        remaining: u32,
    },
    /// Consuming `remaining` Unicode-to-codepoint records.
    InWideCharTable { remaining: u32 },
    /// `ENDCODEPAGE` reached; terminal success.
    Done,
}

impl ParseState {
    /// Human-readable description, used in error and log messages.
    pub fn describe(&self) -> &'static str {
        match self {
            ParseState::Searching => "searching for CODEPAGE",
            ParseState::AwaitingDefault => "awaiting CPINFO",
            ParseState::AwaitingTable => "awaiting a table header",
            ParseState::InSingleByteTable { .. } => "reading MBTABLE records",
            ParseState::InDbcsRange { .. } => "awaiting a DBCS lead-byte range",
            ParseState::AwaitingDbcsTable { .. } => "awaiting a DBCSTABLE header",
            ParseState::InDbcsTable { .. } => "reading DBCSTABLE records",
            ParseState::InWideCharTable { .. } => "reading WCTABLE records",
            ParseState::Done => "done",
        }
    }
}

/// Counters kept for observability. Skipped lines are lenient by design
/// (see [`Parser::feed_line`]) but are always tallied.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseStats {
    pub lines: u64,
    pub comments: u64,
    pub records_applied: u64,
    pub skipped: u64,
}

/// Consumes classified lines in order and drives the [`TableBuilder`].
pub struct Parser {
    state: ParseState,
    builder: TableBuilder,
    codepage: u32,
    stats: ParseStats,
    line_no: u64,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Searching,
            builder: TableBuilder::new(),
            codepage: 0,
            stats: ParseStats::default(),
            line_no: 0,
        }
    }

    /// The state the parser is currently in.
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Feed one line of the mapping file.
    ///
    /// Comments are ignored in every state. A line the current state cannot
    /// interpret is skipped without touching any count (the vendor files
    /// carry annotations the grammar does not cover) but the skip is
    /// tallied and traced. Only structurally impossible input (a lead-byte
    /// range running backwards or past 0xFF, a trail byte above 0xFF) is
    /// fatal.
    pub fn feed_line(&mut self, raw: &str) -> Result<()> {
        self.line_no += 1;
        self.stats.lines += 1;

        let kind = classify(raw);
        if kind == LineKind::Comment {
            self.stats.comments += 1;
            return Ok(());
        }

        self.state = match (self.state, kind) {
            (ParseState::Searching, LineKind::SectionStart) => ParseState::AwaitingDefault,

            (
                ParseState::AwaitingDefault,
                LineKind::DefaultInfo {
                    codepage,
                    default_cp,
                    default_uni,
                },
            ) => {
                debug!(
                    "code page {}: default pair cp={:#06x} uni={:#06x}",
                    codepage, default_cp, default_uni
                );
                self.codepage = codepage;
                self.builder.apply_default(default_cp, default_uni);
                ParseState::AwaitingTable
            }

            (ParseState::AwaitingTable, LineKind::TableHeader { kind, count }) => {
                trace!("line {}: {:?} block of {} records", self.line_no, kind, count);
                match (kind, count) {
                    (_, 0) => ParseState::AwaitingTable,
                    (TableKind::SingleByte, n) => ParseState::InSingleByteTable { remaining: n },
                    (TableKind::WideChar, n) => ParseState::InWideCharTable { remaining: n },
                    // A DBCSTABLE outside a DBCSRANGE has no lead byte to
                    // attach to; skip it like any other stray header.
                    (TableKind::Dbcs, _) => {
                        self.skip(raw);
                        return Ok(());
                    }
                }
            }

            (ParseState::AwaitingTable, LineKind::RangeHeader { count }) => {
                trace!("line {}: DBCSRANGE group of {} ranges", self.line_no, count);
                if count == 0 {
                    ParseState::AwaitingTable
                } else {
                    ParseState::InDbcsRange {
                        ranges_remaining: count,
                    }
                }
            }

            (ParseState::AwaitingTable, LineKind::SectionEnd) => ParseState::Done,

            (ParseState::InSingleByteTable { remaining }, LineKind::Record { first, second }) => {
                self.builder.set_to_unicode(first, second);
                self.stats.records_applied += 1;
                match remaining - 1 {
                    0 => ParseState::AwaitingTable,
                    n => ParseState::InSingleByteTable { remaining: n },
                }
            }

            (ParseState::InWideCharTable { remaining }, LineKind::Record { first, second }) => {
                self.builder.set_from_unicode(first, second);
                self.stats.records_applied += 1;
                match remaining - 1 {
                    0 => ParseState::AwaitingTable,
                    n => ParseState::InWideCharTable { remaining: n },
                }
            }

            (ParseState::InDbcsRange { ranges_remaining }, LineKind::Record { first, second }) => {
                if first > 0xFF || second > 0xFF || second < first {
                    return Err(self.structural_failure(format!(
                        "invalid DBCS lead-byte range {:#06x}..={:#06x}",
                        first, second
                    )));
                }
                trace!(
                    "line {}: lead bytes {:#04x}..={:#04x}",
                    self.line_no, first, second
                );
                ParseState::AwaitingDbcsTable {
                    lead: first as u8,
                    leads_remaining: u32::from(second - first) + 1,
                    ranges_remaining,
                }
            }

            (
                ParseState::AwaitingDbcsTable {
                    lead,
                    leads_remaining,
                    ranges_remaining,
                },
                LineKind::TableHeader {
                    kind: TableKind::Dbcs,
                    count,
                },
            ) => {
                if count == 0 {
                    Self::dbcs_table_done(lead, leads_remaining, ranges_remaining)
                } else {
                    ParseState::InDbcsTable {
                        lead,
                        leads_remaining,
                        ranges_remaining,
                        remaining: count,
                    }
                }
            }

            (
                ParseState::InDbcsTable {
                    lead,
                    leads_remaining,
                    ranges_remaining,
                    remaining,
                },
                LineKind::Record { first, second },
            ) => {
                if first > 0xFF {
                    return Err(self.structural_failure(format!(
                        "trail byte {:#06x} exceeds 0xFF under lead {:#04x}",
                        first, lead
                    )));
                }
                let cp = (u16::from(lead) << 8) | first;
                self.builder.set_to_unicode(cp, second);
                self.stats.records_applied += 1;
                match remaining - 1 {
                    0 => Self::dbcs_table_done(lead, leads_remaining, ranges_remaining),
                    n => ParseState::InDbcsTable {
                        lead,
                        leads_remaining,
                        ranges_remaining,
                        remaining: n,
                    },
                }
            }

            // Everything else is unrecognized for the current state.
            _ => {
                self.skip(raw);
                return Ok(());
            }
        };

        Ok(())
    }

    /// Consume the parser and hand the tables off.
    ///
    /// Fails with [`CodePageError::PrematureEnd`] unless the terminal
    /// `ENDCODEPAGE` marker was reached: incomplete tables are never emitted.
    pub fn finish(self) -> Result<(LookupTables, ParseStats)> {
        if self.state != ParseState::Done {
            return Err(CodePageError::PrematureEnd {
                state: self.state.describe(),
                line_no: self.line_no,
            });
        }
        debug!(
            "parse complete: {} lines, {} records applied, {} comments, {} skipped",
            self.stats.lines, self.stats.comments, self.stats.records_applied, self.stats.skipped
        );
        Ok((self.builder.finish(self.codepage), self.stats))
    }

    /// Epilogue shared by every way a trail-byte table can end: advance to
    /// the next lead byte, or the next range, or back to the table search.
    fn dbcs_table_done(lead: u8, leads_remaining: u32, ranges_remaining: u32) -> ParseState {
        let leads_remaining = leads_remaining - 1;
        if leads_remaining > 0 {
            // Range bounds were validated on entry, so lead + 1 stays in u8.
            ParseState::AwaitingDbcsTable {
                lead: lead + 1,
                leads_remaining,
                ranges_remaining,
            }
        } else if ranges_remaining > 1 {
            ParseState::InDbcsRange {
                ranges_remaining: ranges_remaining - 1,
            }
        } else {
            ParseState::AwaitingTable
        }
    }

    fn skip(&mut self, raw: &str) {
        self.stats.skipped += 1;
        trace!(
            "line {}: skipped while {}: {:?}",
            self.line_no,
            self.state.describe(),
            raw
        );
    }

    fn structural_failure(&self, reason: String) -> CodePageError {
        CodePageError::StructuralFailure {
            reason,
            line_no: self.line_no,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
