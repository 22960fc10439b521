//! Line classification for the WindowsBestFit mapping format.
//!
//! One tokenizer decides *what a line looks like*; the parser decides what
//! it means in the current grammar state. Classification never fails: a line
//! that matches no known pattern is reported as [`LineKind::Unrecognized`].

/// Which kind of record table a `*TABLE` header opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// `MBTABLE`: single-byte codepoint to Unicode records.
    SingleByte,
    /// `WCTABLE`: Unicode to codepoint records.
    WideChar,
    /// `DBCSTABLE`: trail-byte to Unicode records under the current lead byte.
    Dbcs,
}

/// The classified form of one input line.
///
/// Format reference: the readme shipped next to the vendor mapping files
/// (unicode.org `MAPPINGS/VENDORS/MICSFT/WindowsBestFit/readme.txt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Line starting with `;`. Ignored in every state.
    Comment,
    /// `CODEPAGE`: section start marker.
    SectionStart,
    /// `CPINFO <codepage> 0x<defaultCp> 0x<defaultUni>`: the default pair
    /// used to pre-fill both tables, plus the code page number the file
    /// describes.
    DefaultInfo {
        codepage: u32,
        default_cp: u16,
        default_uni: u16,
    },
    /// `MBTABLE <n>` / `WCTABLE <n>` / `DBCSTABLE <n>`.
    TableHeader { kind: TableKind, count: u32 },
    /// `DBCSRANGE <n>`: begins `n` lead-byte ranges.
    RangeHeader { count: u32 },
    /// `0x<first> 0x<second>`: meaning depends on the enclosing block.
    Record { first: u16, second: u16 },
    /// `ENDCODEPAGE`: terminal marker.
    SectionEnd,
    /// Anything else. Never an error by itself.
    Unrecognized,
}

/// Classify a single line of the mapping file.
///
/// Trailing tokens beyond the recognized fields are tolerated (the vendor
/// files carry inline annotations after some records). A hex field that does
/// not fit in 16 bits makes the whole line `Unrecognized`, which is how the
/// 0..=0xFFFF index domain is guaranteed by construction.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim_start();
    if line.starts_with(';') {
        return LineKind::Comment;
    }

    let mut fields = line.split_whitespace();
    let Some(first) = fields.next() else {
        return LineKind::Unrecognized;
    };

    match first {
        "CODEPAGE" => LineKind::SectionStart,
        "ENDCODEPAGE" => LineKind::SectionEnd,
        "CPINFO" => {
            let parsed = (|| {
                let codepage: u32 = fields.next()?.parse().ok()?;
                let default_cp = hex_field(fields.next()?)?;
                let default_uni = hex_field(fields.next()?)?;
                Some(LineKind::DefaultInfo {
                    codepage,
                    default_cp,
                    default_uni,
                })
            })();
            parsed.unwrap_or(LineKind::Unrecognized)
        }
        "MBTABLE" => table_header(TableKind::SingleByte, fields.next()),
        "WCTABLE" => table_header(TableKind::WideChar, fields.next()),
        "DBCSTABLE" => table_header(TableKind::Dbcs, fields.next()),
        "DBCSRANGE" => match fields.next().and_then(|f| f.parse().ok()) {
            Some(count) => LineKind::RangeHeader { count },
            None => LineKind::Unrecognized,
        },
        _ => {
            let parsed = (|| {
                let first = hex_field(first)?;
                let second = hex_field(fields.next()?)?;
                Some(LineKind::Record { first, second })
            })();
            parsed.unwrap_or(LineKind::Unrecognized)
        }
    }
}

fn table_header(kind: TableKind, count: Option<&str>) -> LineKind {
    match count.and_then(|f| f.parse().ok()) {
        Some(count) => LineKind::TableHeader { kind, count },
        None => LineKind::Unrecognized,
    }
}

/// Parse a `0x`-prefixed hex field into a 16-bit value.
fn hex_field(field: &str) -> Option<u16> {
    let digits = field.strip_prefix("0x").or_else(|| field.strip_prefix("0X"))?;
    u16::from_str_radix(digits, 16).ok()
}
