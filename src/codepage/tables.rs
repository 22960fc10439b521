//! Table storage: the mutable builder and the finished lookup tables.

/// Number of entries in each direction table (one per 16-bit code point).
pub const TABLE_LEN: usize = 0x1_0000;

/// Accumulates the two direction tables while the parser runs.
///
/// The builder is passive: it knows nothing about the grammar and applies
/// whatever mutations the parser emits, last write wins. Indices are `u16`,
/// so no store can land outside the 0..=0xFFFF domain.
pub struct TableBuilder {
    to_unicode: Box<[u16]>,
    from_unicode: Box<[u16]>,
}

impl TableBuilder {
    /// Create a builder with both tables zeroed.
    pub fn new() -> Self {
        Self {
            to_unicode: vec![0u16; TABLE_LEN].into_boxed_slice(),
            from_unicode: vec![0u16; TABLE_LEN].into_boxed_slice(),
        }
    }

    /// Pre-fill both tables with the default pair: every codepoint decodes
    /// to `default_uni` and every Unicode code point encodes to `default_cp`
    /// until an explicit record overwrites it.
    pub fn apply_default(&mut self, default_cp: u16, default_uni: u16) {
        self.to_unicode.fill(default_uni);
        self.from_unicode.fill(default_cp);
    }

    /// Record that codepage codepoint `cp` decodes to Unicode `uni`.
    pub fn set_to_unicode(&mut self, cp: u16, uni: u16) {
        self.to_unicode[cp as usize] = uni;
    }

    /// Record that Unicode code point `uni` encodes to codepage codepoint `cp`.
    pub fn set_from_unicode(&mut self, uni: u16, cp: u16) {
        self.from_unicode[uni as usize] = cp;
    }

    /// Hand the arrays off as an immutable table pair.
    pub fn finish(self, codepage: u32) -> LookupTables {
        LookupTables {
            codepage,
            to_unicode: self.to_unicode,
            from_unicode: self.from_unicode,
        }
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The finished translation tables for one code page.
///
/// Both tables cover the full 16-bit domain: every entry holds either the
/// declared default or an explicitly recorded value. Immutable once built.
pub struct LookupTables {
    codepage: u32,
    to_unicode: Box<[u16]>,
    from_unicode: Box<[u16]>,
}

impl LookupTables {
    /// The Windows code page number this table pair describes.
    pub fn codepage(&self) -> u32 {
        self.codepage
    }

    /// Unicode code point for the given codepage codepoint (lead<<8|trail
    /// for double-byte sequences).
    pub fn to_unicode(&self, cp: u16) -> u16 {
        self.to_unicode[cp as usize]
    }

    /// Codepage codepoint for the given Unicode code point. Single-byte
    /// codepoints come back widened to 16 bits.
    pub fn from_unicode(&self, uni: u16) -> u16 {
        self.from_unicode[uni as usize]
    }

    /// The full codepage-to-Unicode table, indexed by codepage codepoint.
    pub fn to_unicode_table(&self) -> &[u16] {
        &self.to_unicode
    }

    /// The full Unicode-to-codepage table, indexed by Unicode code point.
    pub fn from_unicode_table(&self) -> &[u16] {
        &self.from_unicode
    }
}
